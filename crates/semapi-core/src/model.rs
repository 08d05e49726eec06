//! Lock record model
//!
//! The value shape exchanged between the lock manager and the store. In the
//! store a record is one key (`target`) whose value is `owner` and whose
//! native expiry is `ttl`.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// One held lock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockRecord {
    pub target: String,
    pub owner: String,
    pub ttl: Duration,
    /// Wall-clock instant at which the store drops the key
    pub expires_at: DateTime<Utc>,
}

impl LockRecord {
    pub fn new(target: &str, owner: &str, ttl: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            target: target.to_string(),
            owner: owner.to_string(),
            ttl,
            expires_at,
        }
    }

    /// Store key for this record
    pub fn key(&self) -> &str {
        &self.target
    }

    /// Store value for this record
    pub fn value(&self) -> &str {
        &self.owner
    }
}
