//! Graceful shutdown of a live server

mod common;

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use semapi_core::{MemoryStore, StoreAdapter, StoreError};
use semapi_server::startup::{ShutdownSignal, main_server, serve_until_shutdown};

use common::{CONTEXT_PATH, app_state};

/// Memory store whose lock creation takes a full second
#[derive(Default)]
struct SlowStore {
    inner: MemoryStore,
}

#[async_trait]
impl StoreAdapter for SlowStore {
    async fn create_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.inner.create_if_absent(key, value, ttl).await
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.read(key).await
    }

    async fn delete_if_matches(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        self.inner.delete_if_matches(key, expected).await
    }

    async fn ping(&self) -> Result<String, StoreError> {
        self.inner.ping().await
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

fn local_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[actix_web::test]
async fn test_in_flight_request_is_drained() {
    let (listener, port) = local_listener();
    let server = main_server(
        app_state(Arc::new(SlowStore::default())),
        CONTEXT_PATH.to_string(),
        listener,
        Duration::from_secs(2),
    )
    .unwrap();

    let signal = ShutdownSignal::new();
    let serving = actix_web::rt::spawn(serve_until_shutdown(server, signal.subscribe()));

    let request = actix_web::rt::spawn(async move {
        reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/semapi/deploy-prod/lock"))
            .header(reqwest::header::CONNECTION, "close")
            .json(&json!({"user": "alice", "ttl": "10s"}))
            .send()
            .await
    });

    // Shut down while the store call is still sleeping
    tokio::time::sleep(Duration::from_millis(300)).await;
    signal.shutdown();

    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");

    let served = tokio::time::timeout(Duration::from_secs(10), serving)
        .await
        .unwrap();
    served.unwrap().unwrap();
}

#[actix_web::test]
async fn test_idle_server_stops_on_signal() {
    let (listener, port) = local_listener();
    let server = main_server(
        app_state(Arc::new(MemoryStore::new())),
        CONTEXT_PATH.to_string(),
        listener,
        Duration::from_secs(2),
    )
    .unwrap();

    let signal = ShutdownSignal::new();
    let serving = actix_web::rt::spawn(serve_until_shutdown(server, signal.subscribe()));

    let response = reqwest::get(format!("http://127.0.0.1:{port}/semapi/health-check"))
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "pong");

    signal.shutdown();
    let served = tokio::time::timeout(Duration::from_secs(10), serving)
        .await
        .unwrap();
    served.unwrap().unwrap();
}
