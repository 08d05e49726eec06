//! Semapi Server - HTTP front end for the named-resource lock service
//!
//! Exposes lock and unlock endpoints over a shared backing store, plus
//! liveness checks for the server and the store.

pub mod api;
pub mod error;
pub mod metrics;
pub mod model;
pub mod startup;

pub use error::AppError;
pub use model::{AppState, Configuration};
