//! Graceful shutdown handling
//!
//! Signals are caught here rather than by actix-web so the HTTP server and
//! the memory store's sweep task stop on the same notification.

use actix_web::dev::Server;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shutdown signal sender and receiver
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal with a broadcast channel
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Trigger shutdown
    pub fn shutdown(&self) {
        let _ = self.sender.send(());
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
///
/// Returns the shutdown signal that can be used to notify other components
pub fn wait_for_shutdown_signal() -> ShutdownSignal {
    let shutdown = ShutdownSignal::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }

        shutdown_clone.shutdown();
    });

    shutdown
}

/// Run `server` until it exits or shutdown is signalled.
///
/// On shutdown the server stops accepting connections and in-flight requests
/// are drained for up to its shutdown timeout. The server future must keep
/// being polled while it drains, so it is pinned here and never dropped early.
pub async fn serve_until_shutdown(
    server: Server,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let handle = server.handle();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        _ = shutdown_rx.recv() => {}
    }

    info!("Stopping HTTP server, draining in-flight requests");
    let ((), result) = tokio::join!(handle.stop(true), &mut server);
    info!("HTTP server stopped");
    result
}

/// Abort `task` once shutdown is signalled
pub fn abort_on_shutdown(
    task: JoinHandle<()>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;
        task.abort();
        let _ = task.await;
        debug!("Background task stopped");
    })
}
