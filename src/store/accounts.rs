use log::debug;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Account, Credentials};

pub struct AccountRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account and return it with its generated id.
    pub async fn insert(&self, creds: &Credentials) -> Result<Account, StoreError> {
        let account: Account = sqlx::query_as(
            "INSERT INTO account (username, password) VALUES (?1, ?2) \
             RETURNING account_id, username, password",
        )
        .bind(&creds.username)
        .bind(&creds.password)
        .fetch_one(self.pool)
        .await?;

        debug!("Inserted account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as(
            "SELECT account_id, username, password FROM account WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, account_id: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as(
            "SELECT account_id, username, password FROM account WHERE account_id = ?1",
        )
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(account)
    }

    /// Account whose username and password both match exactly.
    pub async fn find_by_credentials(
        &self,
        creds: &Credentials,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as(
            "SELECT account_id, username, password FROM account \
             WHERE username = ?1 AND password = ?2",
        )
        .bind(&creds.username)
        .bind(&creds.password)
        .fetch_optional(self.pool)
        .await?;
        Ok(account)
    }
}
