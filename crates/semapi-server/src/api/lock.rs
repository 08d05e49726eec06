// Lock acquisition and release endpoints

use actix_web::{HttpResponse, post, web};

use semapi_core::{LockParams, UnlockParams};

use crate::{error::AppError, model::AppState};

use super::text_ok;

/// Acquire `{target}` for the body's user with the body's TTL
#[post("/{target}/lock")]
pub async fn lock(
    data: web::Data<AppState>,
    target: web::Path<String>,
    params: web::Json<LockParams>,
) -> Result<HttpResponse, AppError> {
    let command = params.into_inner().into_command(&target)?;
    data.lock_manager.acquire(&command).await?;

    Ok(text_ok("OK"))
}

/// Release `{target}` if the body's user holds it
#[post("/{target}/unlock")]
pub async fn unlock(
    data: web::Data<AppState>,
    target: web::Path<String>,
    params: web::Json<UnlockParams>,
) -> Result<HttpResponse, AppError> {
    let command = params.into_inner().into_command(&target)?;
    data.lock_manager.release(&command).await?;

    Ok(text_ok("OK"))
}
