use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{delete, error, get, patch, post, web, HttpRequest, HttpResponse, Responder};
use log::{debug, warn};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::{Account, Credentials, Message, MessagePatch, NewMessage};
use crate::service::{AccountService, MessageService, Outcome};

/// Invalid is 400, Unauthorized is 401, Absent is 200 with an empty body.
impl<T: Serialize> Responder for Outcome<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            Outcome::Success(value) => HttpResponse::Ok().json(value),
            Outcome::Invalid(_) => HttpResponse::BadRequest().finish(),
            Outcome::Unauthorized => HttpResponse::Unauthorized().finish(),
            Outcome::Absent => HttpResponse::Ok().finish(),
        }
    }
}

/// JSON bodies are accepted whatever the `Content-Type`; undecodable ones get
/// an empty 400.
pub fn json_config() -> web::JsonConfig {
    json_config_rejecting_with(StatusCode::BAD_REQUEST)
}

/// Login only ever answers 200 or 401, undecodable bodies included.
pub fn login_json_config() -> web::JsonConfig {
    json_config_rejecting_with(StatusCode::UNAUTHORIZED)
}

fn json_config_rejecting_with(status: StatusCode) -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(move |err, req| {
            warn!("Rejected body for {} {}: {}", req.method(), req.path(), err);
            error::InternalError::from_response(err, HttpResponse::new(status)).into()
        })
}

#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    body: web::Json<Credentials>,
) -> Outcome<Account> {
    AccountService::new(&pool).register(body.into_inner()).await
}

/// Mounted by [`crate::configure`] as a resource so it can carry
/// [`login_json_config`].
pub async fn login(pool: web::Data<SqlitePool>, body: web::Json<Credentials>) -> Outcome<Account> {
    AccountService::new(&pool).login(body.into_inner()).await
}

#[post("/messages")]
pub async fn create_message(
    pool: web::Data<SqlitePool>,
    body: web::Json<NewMessage>,
) -> Outcome<Message> {
    MessageService::new(&pool).create(body.into_inner()).await
}

#[get("/messages")]
pub async fn list_messages(pool: web::Data<SqlitePool>) -> HttpResponse {
    let messages = MessageService::new(&pool).list_all().await;
    debug!("Listing {} messages", messages.len());
    HttpResponse::Ok().json(messages)
}

#[get("/messages/{message_id}")]
pub async fn get_message(pool: web::Data<SqlitePool>, path: web::Path<i64>) -> Outcome<Message> {
    MessageService::new(&pool).get(path.into_inner()).await
}

#[delete("/messages/{message_id}")]
pub async fn delete_message(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Outcome<Message> {
    MessageService::new(&pool).delete(path.into_inner()).await
}

#[patch("/messages/{message_id}")]
pub async fn update_message(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<MessagePatch>,
) -> Outcome<Message> {
    MessageService::new(&pool)
        .update(path.into_inner(), body.into_inner())
        .await
}

#[get("/accounts/{account_id}/messages")]
pub async fn list_account_messages(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> HttpResponse {
    let account_id = path.into_inner();
    let messages = MessageService::new(&pool).list_by_account(account_id).await;
    debug!("Found {} messages for account {}", messages.len(), account_id);
    HttpResponse::Ok().json(messages)
}
