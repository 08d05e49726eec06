//! Store adapters
//!
//! The lock manager talks to the backing key-value store only through the
//! [`StoreAdapter`] trait. Implementations must make each primitive a single
//! atomic operation on the store side; correctness of the lock protocol
//! depends on it.

mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

pub use self::memory::MemoryStore;
pub use self::redis_store::{RedisStore, RedisStoreConfig};

/// Atomic key-value primitives required by the lock manager
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Write `value` under `key` with expiry `ttl` only if `key` is absent.
    ///
    /// Returns `true` if the key was created, `false` if it already existed.
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    /// Read the current value of `key`
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete `key` only if its current value equals `expected`.
    ///
    /// Returns `false` if the key was absent or held another value.
    async fn delete_if_matches(&self, key: &str, expected: &str) -> Result<bool, StoreError>;

    /// Round-trip to the store, returning its reply
    async fn ping(&self) -> Result<String, StoreError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}
