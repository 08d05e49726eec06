//! Semapi Core - Named-resource lock coordination
//!
//! This crate provides:
//! - The lock record exchanged with the backing store
//! - The `StoreAdapter` capability with Redis and in-memory implementations
//! - The lock manager implementing acquire/release semantics
//! - Validation of inbound lock/unlock parameters
//!
//! The lock manager holds no in-process state. Every contention decision is
//! made by the store's atomic primitives, so any number of service instances
//! can share one store.

pub mod duration;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use duration::parse_duration;
pub use error::{DurationError, LockError, StoreError, UnlockError, ValidationError};
pub use model::LockRecord;
pub use service::lock::LockManager;
pub use store::{MemoryStore, RedisStore, RedisStoreConfig, StoreAdapter};
pub use validation::{LockCommand, LockParams, UnlockCommand, UnlockParams};
