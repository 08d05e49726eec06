use std::net::TcpListener;

use anyhow::Context;
use tracing::info;

use semapi_server::{Configuration, metrics, startup};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;

    let subscriber =
        startup::get_subscriber("semapi-server", &configuration.log_level(), std::io::stdout);
    startup::init_subscriber(subscriber)?;
    metrics::init_metrics();

    let shutdown = startup::wait_for_shutdown_signal();
    let server_shutdown_rx = shutdown.subscribe();

    let address = configuration.server_address();
    let port = configuration.server_port();
    let context_path = configuration.server_context_path();
    let shutdown_timeout = configuration.shutdown_timeout();

    let app_state = startup::build_app_state(&configuration, shutdown.subscribe()).await?;
    info!(
        store = app_state.lock_manager.store_name(),
        "Lock manager ready"
    );

    let listener = TcpListener::bind((address.as_str(), port))
        .with_context(|| format!("Failed to bind {}:{}", address, port))?;
    let server = startup::main_server(app_state, context_path.clone(), listener, shutdown_timeout)
        .context("Failed to start HTTP server")?;

    info!(
        address = %address,
        port,
        context_path = %context_path,
        shutdown_timeout = ?shutdown_timeout,
        "Semapi server started"
    );

    startup::serve_until_shutdown(server, server_shutdown_rx)
        .await
        .context("HTTP server stopped unexpectedly")?;

    info!("Shutdown complete");
    Ok(())
}
