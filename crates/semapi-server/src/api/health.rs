use actix_web::{HttpResponse, Responder, get, web};

use crate::{error::AppError, model::AppState};

use super::text_ok;

/// Liveness of the HTTP server itself
#[get("/health-check")]
pub async fn health_check() -> impl Responder {
    text_ok("pong")
}

/// Round-trip to the backing store, answering with its reply
#[get("/redis/ping")]
pub async fn store_ping(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reply = data.lock_manager.ping_store().await?;
    Ok(text_ok(reply))
}
