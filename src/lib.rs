//! Account registration/login and message CRUD over HTTP, backed by SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod store;

use actix_web::web;

/// Register every route plus the shared JSON body settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .service(handlers::register)
        .service(
            web::resource("/login")
                .app_data(handlers::login_json_config())
                .route(web::post().to(handlers::login)),
        )
        .service(handlers::create_message)
        .service(handlers::list_messages)
        .service(handlers::get_message)
        .service(handlers::delete_message)
        .service(handlers::update_message)
        .service(handlers::list_account_messages);
}
