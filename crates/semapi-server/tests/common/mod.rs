// Shared fixtures for API tests
#![allow(dead_code, unused_macros)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use semapi_core::{LockManager, MemoryStore, StoreAdapter, StoreError};
use semapi_server::AppState;

pub const CONTEXT_PATH: &str = "/semapi";

/// App state over the given store
pub fn app_state(store: Arc<dyn StoreAdapter>) -> Arc<AppState> {
    Arc::new(AppState::new(LockManager::new(store)))
}

pub fn memory_state() -> Arc<AppState> {
    app_state(Arc::new(MemoryStore::new()))
}

/// Store whose every call fails as if Redis were unreachable
pub struct DownStore;

#[async_trait]
impl StoreAdapter for DownStore {
    async fn create_if_absent(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete_if_matches(&self, _key: &str, _expected: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<String, StoreError> {
        Err(StoreError::Timeout(Duration::from_secs(3)))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

/// Build a test service over `state`, routed the same way as the server
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from($state))
                .app_data(semapi_server::api::json_config())
                .service(semapi_server::api::route::routes(common::CONTEXT_PATH)),
        )
        .await
    };
}

/// POST a JSON body, returning the status and the plain-text body
macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }};
}
