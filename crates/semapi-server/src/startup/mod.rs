//! Server startup: logging, store selection, HTTP server and shutdown

pub mod http;
pub mod shutdown;
pub mod store;
pub mod telemetry;

pub use http::{build_app_state, main_server};
pub use shutdown::{ShutdownSignal, serve_until_shutdown, wait_for_shutdown_signal};
pub use store::build_store;
pub use telemetry::{get_subscriber, init_subscriber};
