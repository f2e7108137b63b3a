use std::str::FromStr;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreError;

const SCHEMA: &str = include_str!("../migrations/001_schema.sql");

/// Open a connection pool and make sure both tables exist.
///
/// In-memory databases live per connection, so they are pinned to a single
/// connection that is never recycled.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?
    };

    bootstrap(&pool).await?;
    info!("Database ready at {}", database_url);
    Ok(pool)
}

/// Apply the schema. Safe to run against an already initialised database.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Fresh in-memory database for tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool should connect")
}
