// Configuration keys and defaults

pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";
pub const SERVER_CONTEXT_PATH_PROPERTY: &str = "server.context_path";
pub const SERVER_SHUTDOWN_TIMEOUT_PROPERTY: &str = "server.shutdown_timeout_secs";

pub const STORE_MODE_PROPERTY: &str = "store.mode";

pub const REDIS_HOST_PROPERTY: &str = "redis.host";
pub const REDIS_PORT_PROPERTY: &str = "redis.port";
pub const REDIS_PASSWORD_PROPERTY: &str = "redis.password";
pub const REDIS_DB_PROPERTY: &str = "redis.db";
pub const REDIS_TIMEOUT_MS_PROPERTY: &str = "redis.timeout_ms";

pub const LOG_LEVEL_PROPERTY: &str = "log.level";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8686;
pub const DEFAULT_CONTEXT_PATH: &str = "semapi";
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_REDIS_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_PREFIX: &str = "SEMAPI";
pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

/// Sweep interval for the in-memory store's expiry task
pub const MEMORY_STORE_SWEEP_INTERVAL_SECS: u64 = 5;
