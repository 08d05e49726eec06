//! HTTP API for the lock service

pub mod health;
pub mod lock;
pub mod route;

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error, web};

/// Plain-text 200 response
pub fn text_ok(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body.into())
}

/// JSON extractor settings: malformed bodies become plain-text 400s
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest()
                .content_type(ContentType::plaintext())
                .body(message),
        )
        .into()
    })
}
