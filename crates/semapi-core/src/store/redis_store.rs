// Redis-backed store adapter
// Uses SET NX PX for creation and a server-side script for compare-and-delete

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::histogram;
use redis::aio::ConnectionManager;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult, Script};
use tracing::{info, warn};

use crate::error::StoreError;

use super::StoreAdapter;

/// Deletes KEYS[1] only while it still holds ARGV[1]
const DELETE_IF_MATCHES_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Connection settings for [`RedisStore`]
#[derive(Clone, Debug)]
pub struct RedisStoreConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
    /// Upper bound for every store round-trip, including the initial connect
    pub timeout: Duration,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            db: 0,
            timeout: Duration::from_secs(3),
        }
    }
}

impl RedisStoreConfig {
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// Store adapter over a shared, auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    delete_script: Script,
    timeout: Duration,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("conn", &"<ConnectionManager>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RedisStore {
    /// Connect to Redis. Fails if the server cannot be reached within the timeout.
    pub async fn connect(config: &RedisStoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.connection_info())?;
        let conn = tokio::time::timeout(config.timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(config.timeout))??;

        info!(
            host = %config.host,
            port = config.port,
            db = config.db,
            "Connected to Redis"
        );

        Ok(Self {
            conn,
            delete_script: Script::new(DELETE_IF_MATCHES_SCRIPT),
            timeout: config.timeout,
        })
    }

    async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, fut).await;
        histogram!("store_operation_duration_seconds", "op" => op)
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(op, error = %e, "Redis operation failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(op, timeout = ?self.timeout, "Redis operation timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

/// Redis expiry in whole milliseconds, never zero
fn ttl_millis(ttl: Duration) -> u64 {
    ttl.as_millis().clamp(1, u64::MAX as u128) as u64
}

#[async_trait]
impl StoreAdapter for RedisStore {
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Option<String> = self
            .run("create_if_absent", async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("NX")
                    .arg("PX")
                    .arg(ttl_millis(ttl))
                    .query_async(&mut conn)
                    .await
            })
            .await?;
        Ok(reply.is_some())
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        self.run("read", async move {
            redis::cmd("GET").arg(key).query_async(&mut conn).await
        })
        .await
    }

    async fn delete_if_matches(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let script = &self.delete_script;
        let deleted: i64 = self
            .run("delete_if_matches", async move {
                let mut invocation = script.prepare_invoke();
                invocation.key(key).arg(expected);
                invocation.invoke_async(&mut conn).await
            })
            .await?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<String, StoreError> {
        let mut conn = self.conn.clone();
        self.run("ping", async move {
            redis::cmd("PING").query_async(&mut conn).await
        })
        .await
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
