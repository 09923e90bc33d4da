//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests (`tests/common/mod.rs`) use the exact same middleware
//! stack.

use std::any::Any;
use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::config::{AllowList, CorsConfig};
use crate::error::ErrorBody;
use crate::handlers::health;
use crate::middleware::cors::reject_disallowed_preflight;
use crate::openapi;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. Panic recovery (catch panics, return 500 JSON)
/// 2. Request timeout
/// 3. JSON envelope for bare 405/408 responses
/// 4. CORS
/// 5. Preflight guard (reject disallowed CORS preflights with 400)
/// 6. Propagate request ID to response
/// 7. Structured request/response tracing
/// 8. Set request ID on incoming requests
pub fn build_app_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = build_cors_layer(&config.cors);
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let span_config = config.clone();
    let make_span = move |request: &Request| -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
            app = %span_config.app_name,
            environment = %span_config.environment,
        )
    };

    Router::new()
        .route("/", get(health::root))
        // Swagger UI, ReDoc and the raw OpenAPI document.
        .merge(openapi::docs_router(&config))
        // Health probes at root level as well as under the API prefix.
        .merge(routes::health::router())
        .nest(&config.api_prefix, routes::api_routes())
        .fallback(not_found)
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500 JSON.
        .layer(CatchPanicLayer::custom(handle_panic))
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Bodyless 405 (routing) and 408 (timeout) get the error envelope.
        .layer(axum::middleware::map_response(envelope_bare_errors))
        // CORS.
        .layer(cors)
        // Reject preflights CORS would silently ignore.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            reject_disallowed_preflight,
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // Shared state.
        .with_state(state)
}

/// Build the CORS middleware layer from the configured policy.
///
/// Browsers refuse a literal `*` together with credentials, so wildcards are
/// answered by echoing the request's origin, method or headers instead.
pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let credentials = cors.allow_credentials;

    let origin = match &cors.origins {
        AllowList::Any if credentials => AllowOrigin::mirror_request(),
        AllowList::Any => AllowOrigin::any(),
        AllowList::List(origins) => AllowOrigin::list(origins.iter().cloned()),
    };
    let methods = match &cors.methods {
        AllowList::Any if credentials => AllowMethods::mirror_request(),
        AllowList::Any => AllowMethods::any(),
        AllowList::List(methods) => AllowMethods::list(methods.iter().cloned()),
    };
    let headers = match &cors.headers {
        AllowList::Any if credentials => AllowHeaders::mirror_request(),
        AllowList::Any => AllowHeaders::any(),
        AllowList::List(headers) => AllowHeaders::list(headers.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(credentials)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600))
}

/// Unknown routes get the standard error envelope.
async fn not_found() -> Response {
    ErrorBody::new("NOT_FOUND", "Resource not found").respond(StatusCode::NOT_FOUND)
}

/// Replace the empty body of 405 and 408 responses produced by axum's method
/// routing and by the timeout layer with the standard error envelope.
/// Other headers, such as `Allow`, are kept.
async fn envelope_bare_errors(response: Response) -> Response {
    let (code, message) = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => ("METHOD_NOT_ALLOWED", "Method not allowed"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timed out"),
        _ => return response,
    };
    if response.headers().contains_key(CONTENT_TYPE) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    let (envelope, body) = ErrorBody::new(code, message)
        .respond(parts.status)
        .into_parts();
    parts.headers.extend(envelope.headers);
    Response::from_parts(parts, body)
}

/// Log the panic payload and answer with a generic 500 envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ErrorBody::new("INTERNAL_ERROR", "An internal error occurred")
        .respond(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{HeaderValue, Method};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn credentials_with_wildcards_do_not_panic() {
        let cors = CorsConfig {
            origins: AllowList::Any,
            allow_credentials: true,
            methods: AllowList::Any,
            headers: AllowList::Any,
        };
        let _ = build_cors_layer(&cors);
    }

    #[test]
    fn explicit_lists_build() {
        let cors = CorsConfig {
            origins: AllowList::List(vec![HeaderValue::from_static("http://localhost:3000")]),
            allow_credentials: false,
            methods: AllowList::List(vec![Method::GET]),
            headers: AllowList::Any,
        };
        let _ = build_cors_layer(&cors);
    }

    // ---

    #[tokio::test]
    async fn timed_out_request_gets_json_envelope() {
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(20),
            ))
            .layer(axum::middleware::map_response(envelope_bare_errors));

        let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let json = json_body(response).await;
        assert_eq!(json["code"], "REQUEST_TIMEOUT");
        assert_eq!(json["error"], "Request timed out");
    }

    #[tokio::test]
    async fn responses_with_a_body_pass_through() {
        let app: Router = Router::new()
            .route(
                "/teapot",
                get(|| async { (StatusCode::REQUEST_TIMEOUT, "custom") }),
            )
            .layer(axum::middleware::map_response(envelope_bare_errors));

        let request = Request::builder().uri("/teapot").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"custom");
    }
}
