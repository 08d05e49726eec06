//! HTTP API tests for lock and unlock over the in-memory store

#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use common::{DownStore, app_state, memory_state};

#[actix_web::test]
async fn test_health_check() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::get()
        .uri("/semapi/health-check")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "pong");
}

#[actix_web::test]
async fn test_store_ping() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::get().uri("/semapi/redis/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "PONG");
}

#[actix_web::test]
async fn test_lock_unlock_scenario() {
    let app = init_app!(memory_state());
    let lock_uri = "/semapi/org-repo-stage/lock";
    let unlock_uri = "/semapi/org-repo-stage/unlock";

    let (status, body) = post_json!(
        &app,
        lock_uri,
        json!({"target": "org-repo-stage", "user": "test", "ttl": "1s"}),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = post_json!(
        &app,
        lock_uri,
        json!({"target": "org-repo-stage", "user": "test", "ttl": "1s"}),
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "org-repo-stage is already locked.");

    let (status, body) = post_json!(
        &app,
        lock_uri,
        json!({"target": "org-repo-stage", "user": "InvalidUser", "ttl": "1s"}),
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "org-repo-stage is locked by InvalidUser.");

    let (status, body) = post_json!(
        &app,
        unlock_uri,
        json!({"target": "org-repo-stage", "user": "test"}),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = post_json!(
        &app,
        unlock_uri,
        json!({"target": "org-repo-stage", "user": "test"}),
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "org-repo-stage haven't locked");
}

#[actix_web::test]
async fn test_unlock_by_other_owner_keeps_lock() {
    let app = init_app!(memory_state());

    let (status, _) = post_json!(
        &app,
        "/semapi/deploy-prod/lock",
        json!({"user": "alice", "ttl": "1m"}),
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json!(&app, "/semapi/deploy-prod/unlock", json!({"user": "bob"}));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        "deploy-prod don't release lock, because lock owner isn't bob"
    );

    // Still held by alice
    let (_, body) = post_json!(
        &app,
        "/semapi/deploy-prod/lock",
        json!({"user": "bob", "ttl": "1m"}),
    );
    assert_eq!(body, "deploy-prod is locked by bob.");

    let (status, _) = post_json!(&app, "/semapi/deploy-prod/unlock", json!({"user": "alice"}));
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json!(
        &app,
        "/semapi/deploy-prod/lock",
        json!({"user": "bob", "ttl": "1m"}),
    );
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_validation_errors_are_bad_requests() {
    let app = init_app!(memory_state());

    let (status, body) = post_json!(&app, "/semapi/t1/lock", json!({"ttl": "1s"}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "user is required");

    let (status, body) = post_json!(
        &app,
        "/semapi/t1/lock",
        json!({"user": "u", "ttl": "soon"}),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("ttl is invalid"), "{body}");

    let (status, body) = post_json!(
        &app,
        "/semapi/t1/lock",
        json!({"target": "t2", "user": "u", "ttl": "1s"}),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "target t2 does not match path target t1");

    let (status, body) = post_json!(&app, "/semapi/t1/unlock", json!({}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "user is required");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/semapi/t1/lock")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_store_unavailable() {
    let app = init_app!(app_state(Arc::new(DownStore)));

    let (status, body) = post_json!(
        &app,
        "/semapi/t1/lock",
        json!({"user": "u", "ttl": "1s"}),
    );
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "store unavailable: connection refused");

    let (status, _) = post_json!(&app, "/semapi/t1/unlock", json!({"user": "u"}));
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let req = test::TestRequest::get().uri("/semapi/redis/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_unknown_route() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::get().uri("/semapi/t1/lock").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
