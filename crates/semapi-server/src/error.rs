// HTTP error mapping for lock operations
// Bodies are plain text carrying the domain error's message verbatim

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

use semapi_core::{LockError, StoreError, UnlockError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Unlock(#[from] UnlockError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::Store(_)
                | AppError::Lock(LockError::Store(_))
                | AppError::Unlock(UnlockError::Store(_))
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ if self.is_store_failure() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}
