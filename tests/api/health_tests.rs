//! Health Check API Tests

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use crate::common::TestApp;

fn server() -> TestServer {
    TestServer::new(TestApp::new().router).unwrap()
}

#[tokio::test]
async fn test_health_check_returns_ok() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_liveness_check() {
    let response = server().get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let response = server().get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_http_counters() {
    let server = server();
    server.get("/health").await.assert_status_ok();

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    assert!(response.text().contains("room_chat_server_http_requests_total"));
}
