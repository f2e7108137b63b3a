use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Builder;
use log::info;
use std::error::Error;

use social_api::config::Config;
use social_api::{configure, db};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;

    Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    info!("Starting social media backend...");
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    let pool = web::Data::new(pool);

    info!(
        "Listening on {} with {} workers",
        config.bind_addr, config.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(pool.clone())
            .configure(configure)
    })
    .workers(config.workers)
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
