//! Integration tests for the health probes and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /health reports service metadata and a reachable database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_healthy(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["app_name"], "starter-api-test");
    assert_eq!(json["environment"], "development");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
    assert!(json["timestamp"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_probes_are_mounted_under_prefix(pool: PgPool) {
    for path in ["/api/v1/health", "/api/v1/ready", "/api/v1/live"] {
        let response = get(common::build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

// ---------------------------------------------------------------------------
// Test: readiness and liveness probes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ready_when_database_reachable(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ready");
}

#[tokio::test]
async fn unreachable_database_degrades_health() {
    let response = get(common::lazy_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);

    let response = get(common::lazy_app(), "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "degraded");
}

#[tokio::test]
async fn live_does_not_touch_database() {
    let response = get(common::lazy_app(), "/live").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

// ---------------------------------------------------------------------------
// Test: GET / returns the welcome payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_welcome() {
    let response = get(common::lazy_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Welcome to starter-api-test");
    assert_eq!(json["docs"], "/docs");
    assert_eq!(json["redoc"], "/redoc");
    assert_eq!(json["openapi"], "/openapi.json");
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unknown route returns the 404 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(common::lazy_app(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unsupported method on a known route returns the 405 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_method_returns_405_envelope() {
    let request = axum::http::Request::builder()
        .method(axum::http::Method::PUT)
        .uri("/api/v1/items")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::lazy_app(), request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response.headers()["allow"].to_str().unwrap().to_owned();
    assert!(allow.contains("GET") && allow.contains("POST"), "got {allow}");
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["error"], "Method not allowed");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(common::lazy_app(), "/live").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header")
        .to_str()
        .unwrap();

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.len(), 36, "x-request-id should be a UUID string");
}

#[tokio::test]
async fn client_request_id_is_propagated() {
    let request = axum::http::Request::builder()
        .uri("/live")
        .header("x-request-id", "abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::lazy_app(), request).await;

    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
