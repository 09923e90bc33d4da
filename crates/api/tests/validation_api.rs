//! Request validation at the HTTP boundary.
//!
//! Every request here is rejected before a database connection is needed, so
//! the app is built on a pool that never connects.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, delete, get, lazy_app, patch_json, post_json, post_raw, send};
use serde_json::json;

const ITEMS: &str = "/api/v1/items";

async fn assert_validation_error(response: axum::response::Response) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].is_string());
    json
}

// ---------------------------------------------------------------------------
// Create body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let response = post_json(lazy_app(), ITEMS, json!({"name": "Widget"})).await;
    assert_validation_error(response).await;

    let response = post_json(lazy_app(), ITEMS, json!({"price": 1.0})).await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn create_rejects_out_of_range_values() {
    let cases = [
        (json!({"name": "", "price": 1.0}), "name"),
        (json!({"name": "   ", "price": 1.0}), "name"),
        (json!({"name": "n".repeat(101), "price": 1.0}), "name"),
        (json!({"name": "Widget", "description": "d".repeat(501), "price": 1.0}), "description"),
        (json!({"name": "Widget", "price": 0}), "price"),
        (json!({"name": "Widget", "price": -3.5}), "price"),
        (json!({"name": "Widget", "price": 1.0, "metadata": [1]}), "metadata"),
    ];

    for (body, field) in cases {
        let response = post_json(lazy_app(), ITEMS, body).await;
        let json = assert_validation_error(response).await;
        assert!(json["details"][field].is_array(), "expected details for {field}: {json}");
    }
}

#[tokio::test]
async fn create_rejects_wrong_types() {
    let response = post_json(lazy_app(), ITEMS, json!({"name": "Widget", "price": "cheap"})).await;
    assert_validation_error(response).await;

    let response = post_json(
        lazy_app(),
        ITEMS,
        json!({"name": "Widget", "price": 1.0, "is_available": "yes"}),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let response = post_raw(lazy_app(), ITEMS, "{\"name\": ").await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn missing_content_type_returns_415() {
    let request = Request::builder()
        .method(Method::POST)
        .uri(ITEMS)
        .body(Body::from(r#"{"name": "Widget", "price": 1.0}"#))
        .unwrap();
    let response = send(lazy_app(), request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn oversized_body_returns_413() {
    // Larger than axum's default 2 MiB body limit.
    let description = "d".repeat(3 * 1024 * 1024);
    let response = post_json(
        lazy_app(),
        ITEMS,
        json!({"name": "Widget", "price": 1.0, "description": description}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
}

// ---------------------------------------------------------------------------
// Patch body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_validates_provided_fields() {
    let uri = format!("{ITEMS}/{}", uuid::Uuid::new_v4());

    let response = patch_json(lazy_app(), &uri, json!({"name": ""})).await;
    let json = assert_validation_error(response).await;
    assert!(json["details"]["name"].is_array());

    let response = patch_json(lazy_app(), &uri, json!({"price": -1})).await;
    let json = assert_validation_error(response).await;
    assert!(json["details"]["price"].is_array());
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_rejects_out_of_range_pagination() {
    for (query, field) in [("limit=0", "limit"), ("limit=101", "limit"), ("skip=-1", "skip")] {
        let response = get(lazy_app(), &format!("{ITEMS}?{query}")).await;
        let json = assert_validation_error(response).await;
        assert!(json["details"][field].is_array(), "expected details for {query}");
    }
}

#[tokio::test]
async fn list_rejects_unparseable_query() {
    let response = get(lazy_app(), &format!("{ITEMS}?limit=ten")).await;
    assert_validation_error(response).await;

    let response = get(lazy_app(), &format!("{ITEMS}/stats/count?available_only=maybe")).await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_id_is_not_found() {
    let response = get(lazy_app(), &format!("{ITEMS}/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["details"]["id"], "not-a-uuid");

    let response = delete(lazy_app(), &format!("{ITEMS}/12345")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json(lazy_app(), &format!("{ITEMS}/12345"), json!({"price": 2.0})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
