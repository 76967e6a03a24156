//! Health endpoint integration tests.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;

use helpers::{FailingBackend, TestApp};

#[tokio::test]
async fn test_health_reports_backend_up() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["backend"], "up");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_reports_backend_down() {
    let app = TestApp::with_backend(Arc::new(FailingBackend));

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["backend"], "down");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    let response = app.get("/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
