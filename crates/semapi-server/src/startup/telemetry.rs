//! Logging initialization
//!
//! Structured JSON logs in Bunyan format. `RUST_LOG` takes precedence over
//! the configured level; records from the `log` crate (actix-web's access
//! logger among them) are bridged into `tracing`.

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Creates a tracing subscriber with Bunyan JSON formatting.
///
/// # Arguments
/// * `name` - The application name for log entries
/// * `env_filter` - Default log level filter (e.g., "info", "debug")
/// * `sink` - The output sink for log entries
pub fn get_subscriber(
    name: &str,
    env_filter: &str,
    sink: impl for<'a> MakeWriter<'a> + 'static + Send + Sync,
) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Initializes the global subscriber for tracing.
///
/// This should only be called once during application startup.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;
    set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set subscriber: {}", e))?;
    Ok(())
}
