// Lock manager: acquire/release protocol over a StoreAdapter
// Holds no lock state of its own; the store decides every contention

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, info};

use crate::error::{LockError, StoreError, UnlockError};
use crate::model::LockRecord;
use crate::store::StoreAdapter;
use crate::validation::{LockCommand, UnlockCommand};

/// Named-resource lock manager.
///
/// Per target the state is `Absent -> Held(owner) -> Absent`, where the way
/// back to `Absent` is either a release by the holding owner or the store
/// expiring the key.
#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn StoreAdapter>,
}

impl std::fmt::Debug for LockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockManager")
            .field("store", &self.store.name())
            .finish()
    }
}

impl LockManager {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    /// Acquire `target` for `owner`, expiring after `ttl`.
    ///
    /// Never waits: either the lock is created now or an error says who is
    /// in the way. A lock held by the same owner is not extended.
    pub async fn acquire_lock(
        &self,
        target: &str,
        owner: &str,
        ttl: Duration,
    ) -> Result<LockRecord, LockError> {
        let result = self.try_acquire(target, owner, ttl).await;

        let outcome = match &result {
            Ok(_) => "acquired",
            Err(e) => e.kind(),
        };
        counter!("lock_acquire_total", "result" => outcome).increment(1);

        result
    }

    async fn try_acquire(
        &self,
        target: &str,
        owner: &str,
        ttl: Duration,
    ) -> Result<LockRecord, LockError> {
        let record = LockRecord::new(target, owner, ttl);

        if self
            .store
            .create_if_absent(record.key(), record.value(), ttl)
            .await?
        {
            info!(
                resource = %target,
                owner = %owner,
                ttl = ?ttl,
                expires_at = %record.expires_at,
                "Lock acquired"
            );
            return Ok(record);
        }

        let holder = self.store.read(target).await?;
        debug!(
            resource = %target,
            owner = %owner,
            holder = ?holder,
            "Lock acquisition rejected"
        );

        match holder {
            Some(holder) if holder == owner => Err(LockError::AlreadyLocked {
                target: target.to_string(),
            }),
            // The requesting owner is reported, not the holder
            _ => Err(LockError::LockedByOther {
                target: target.to_string(),
                owner: owner.to_string(),
            }),
        }
    }

    /// Release `target` if it is currently held by `owner`
    pub async fn release_lock(&self, target: &str, owner: &str) -> Result<(), UnlockError> {
        let result = self.try_release(target, owner).await;

        let outcome = match &result {
            Ok(_) => "released",
            Err(e) => e.kind(),
        };
        counter!("lock_release_total", "result" => outcome).increment(1);

        result
    }

    async fn try_release(&self, target: &str, owner: &str) -> Result<(), UnlockError> {
        let holder = self
            .store
            .read(target)
            .await?
            .ok_or_else(|| UnlockError::NotLocked {
                target: target.to_string(),
            })?;

        if holder != owner {
            debug!(resource = %target, owner = %owner, holder = %holder, "Lock release rejected");
            return Err(UnlockError::OwnerMismatch {
                target: target.to_string(),
                owner: owner.to_string(),
            });
        }

        // Conditional delete: the key may have expired and been re-acquired
        // since the read above
        if !self.store.delete_if_matches(target, owner).await? {
            debug!(resource = %target, owner = %owner, "Lock vanished before release");
            return Err(UnlockError::NotLocked {
                target: target.to_string(),
            });
        }

        info!(resource = %target, owner = %owner, "Lock released");
        Ok(())
    }

    /// Acquire from a validated request
    pub async fn acquire(&self, cmd: &LockCommand) -> Result<LockRecord, LockError> {
        self.acquire_lock(&cmd.target, &cmd.owner, cmd.ttl).await
    }

    /// Release from a validated request
    pub async fn release(&self, cmd: &UnlockCommand) -> Result<(), UnlockError> {
        self.release_lock(&cmd.target, &cmd.owner).await
    }

    /// Round-trip to the backing store
    pub async fn ping_store(&self) -> Result<String, StoreError> {
        self.store.ping().await
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}
