// Backing store selection

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{info, warn};

use semapi_core::{MemoryStore, RedisStore, StoreAdapter};

use crate::model::{Configuration, StoreMode, constants::MEMORY_STORE_SWEEP_INTERVAL_SECS};

use super::shutdown::abort_on_shutdown;

/// Build the configured store, failing if Redis cannot be reached.
///
/// The memory store's sweep task is stopped when `shutdown_rx` fires.
pub async fn build_store(
    configuration: &Configuration,
    shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<Arc<dyn StoreAdapter>> {
    match configuration.store_mode()? {
        StoreMode::Redis => {
            let redis_config = configuration.redis_store_config();
            let address = format!("{}:{}", redis_config.host, redis_config.port);

            let store = RedisStore::connect(&redis_config)
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", address))?;
            let reply = store
                .ping()
                .await
                .with_context(|| format!("Redis at {} did not answer PING", address))?;

            info!(address = %address, db = redis_config.db, reply = %reply, "Redis store ready");
            Ok(Arc::new(store))
        }
        StoreMode::Memory => {
            warn!("Using in-memory store; locks are not shared between instances");
            let store = MemoryStore::new();
            let sweeper =
                store.spawn_expiry_task(Duration::from_secs(MEMORY_STORE_SWEEP_INTERVAL_SECS));
            abort_on_shutdown(sweeper, shutdown_rx);
            Ok(Arc::new(store))
        }
    }
}
