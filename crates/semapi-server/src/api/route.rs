//! Routing configuration
//!
//! Routes, relative to the configured context path:
//! - GET /health-check - Server liveness
//! - GET /redis/ping - Backing store liveness
//! - POST /{target}/lock - Acquire a lock
//! - POST /{target}/unlock - Release a lock

use actix_web::{Scope, web};

use super::{health, lock};

pub fn routes(context_path: &str) -> Scope {
    web::scope(context_path)
        .service(health::health_check)
        .service(health::store_ping)
        .service(lock::lock)
        .service(lock::unlock)
}
