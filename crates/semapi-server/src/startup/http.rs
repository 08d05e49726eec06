//! HTTP server setup

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, Service, ServiceResponse};
use actix_web::{App, HttpServer, middleware::Logger, web};
use tokio::sync::broadcast;

use semapi_core::LockManager;

use crate::{
    api::{json_config, route::routes},
    metrics::{Timer, record_http_request},
    model::{AppState, Configuration},
};

use super::store::build_store;

/// Route label for requests that matched no route
const UNMATCHED_ROUTE: &str = "unmatched";

/// Connects the configured store and wraps it in the shared state
pub async fn build_app_state(
    configuration: &Configuration,
    shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<Arc<AppState>> {
    let store = build_store(configuration, shutdown_rx).await?;
    let lock_manager = LockManager::new(store);

    Ok(Arc::new(AppState::new(lock_manager)))
}

/// Route pattern and status of a finished request, failed ones included
fn request_outcome<B>(result: &Result<ServiceResponse<B>, actix_web::Error>) -> (String, u16) {
    match result {
        Ok(res) => (
            res.request()
                .match_pattern()
                .unwrap_or_else(|| UNMATCHED_ROUTE.to_string()),
            res.status().as_u16(),
        ),
        Err(e) => (
            UNMATCHED_ROUTE.to_string(),
            e.as_response_error().status_code().as_u16(),
        ),
    }
}

/// Creates the main HTTP server on an already bound listener.
///
/// Signal handling is left to the caller; stop the server through its
/// handle to drain in-flight requests for up to `shutdown_timeout`.
pub fn main_server(
    app_state: Arc<AppState>,
    context_path: String,
    listener: TcpListener,
    shutdown_timeout: Duration,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                let timer = Timer::new();
                let method = req.method().to_string();
                let fut = srv.call(req);
                async move {
                    let result = fut.await;
                    let (path, status) = request_outcome(&result);
                    record_http_request(&method, &path, status, timer.elapsed_secs());
                    result
                }
            })
            .app_data(web::Data::from(app_state.clone()))
            .app_data(json_config())
            .service(routes(&context_path))
    })
    .disable_signals()
    .shutdown_timeout(shutdown_timeout.as_secs())
    .listen(listener)?
    .run())
}
