//! Configuration management for the semapi server
//!
//! Values are layered lowest to highest: built-in defaults, the optional
//! YAML file, `SEMAPI_*` environment variables, then command line flags.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::{Config, Environment, File};

use semapi_core::RedisStoreConfig;

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_CONTEXT_PATH, DEFAULT_LOG_LEVEL, DEFAULT_REDIS_HOST,
    DEFAULT_REDIS_PORT, DEFAULT_REDIS_TIMEOUT_MS, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
    DEFAULT_SHUTDOWN_TIMEOUT_SECS, ENV_PREFIX, LOG_LEVEL_PROPERTY, REDIS_DB_PROPERTY,
    REDIS_HOST_PROPERTY, REDIS_PASSWORD_PROPERTY, REDIS_PORT_PROPERTY, REDIS_TIMEOUT_MS_PROPERTY,
    SERVER_ADDRESS_PROPERTY, SERVER_CONTEXT_PATH_PROPERTY, SERVER_PORT_PROPERTY,
    SERVER_SHUTDOWN_TIMEOUT_PROPERTY, STORE_MODE_PROPERTY,
};

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command(name = "semapi-server", version, about = "Named-resource lock service")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    #[arg(long = "redis-host")]
    pub redis_host: Option<String>,
    #[arg(long = "redis-port")]
    pub redis_port: Option<u16>,
    /// Backing store: redis or memory
    #[arg(long = "store-mode")]
    pub store_mode: Option<String>,
}

/// Backing store selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreMode {
    #[default]
    Redis,
    Memory,
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown store mode: {}", s)),
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration loaded from config files, environment and flags
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Build from the process arguments
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(File::with_name(&args.config).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT_PROPERTY, v)?;
        }
        if let Some(v) = args.redis_host {
            config_builder = config_builder.set_override(REDIS_HOST_PROPERTY, v)?;
        }
        if let Some(v) = args.redis_port {
            config_builder = config_builder.set_override(REDIS_PORT_PROPERTY, v)?;
        }
        if let Some(v) = args.store_mode {
            config_builder = config_builder.set_override(STORE_MODE_PROPERTY, v)?;
        }

        let app_config = config_builder
            .build()
            .with_context(|| format!("Failed to build configuration - check {}", args.config))?;

        Ok(Configuration { config: app_config })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT_PROPERTY)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Scope prefix for every route, always with a leading slash unless empty
    pub fn server_context_path(&self) -> String {
        let path = self
            .config
            .get_string(SERVER_CONTEXT_PATH_PROPERTY)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string());
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        let secs = self
            .config
            .get_int(SERVER_SHUTDOWN_TIMEOUT_PROPERTY)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    // ========================================================================
    // Store Configuration
    // ========================================================================

    pub fn store_mode(&self) -> anyhow::Result<StoreMode> {
        match self.config.get_string(STORE_MODE_PROPERTY) {
            Ok(v) => v.parse().map_err(anyhow::Error::msg),
            Err(_) => Ok(StoreMode::default()),
        }
    }

    pub fn redis_host(&self) -> String {
        self.config
            .get_string(REDIS_HOST_PROPERTY)
            .unwrap_or(DEFAULT_REDIS_HOST.to_string())
    }

    pub fn redis_port(&self) -> u16 {
        self.config
            .get_int(REDIS_PORT_PROPERTY)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_REDIS_PORT)
    }

    /// Empty means no AUTH
    pub fn redis_password(&self) -> Option<String> {
        self.config
            .get_string(REDIS_PASSWORD_PROPERTY)
            .ok()
            .filter(|p| !p.is_empty())
    }

    pub fn redis_db(&self) -> i64 {
        self.config.get_int(REDIS_DB_PROPERTY).unwrap_or(0)
    }

    pub fn redis_timeout(&self) -> Duration {
        let millis = self
            .config
            .get_int(REDIS_TIMEOUT_MS_PROPERTY)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_REDIS_TIMEOUT_MS);
        Duration::from_millis(millis)
    }

    pub fn redis_store_config(&self) -> RedisStoreConfig {
        RedisStoreConfig {
            host: self.redis_host(),
            port: self.redis_port(),
            password: self.redis_password(),
            db: self.redis_db(),
            timeout: self.redis_timeout(),
        }
    }

    // ========================================================================
    // Logging
    // ========================================================================

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL_PROPERTY)
            .unwrap_or(DEFAULT_LOG_LEVEL.to_string())
    }
}
