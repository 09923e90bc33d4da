//! CORS preflight guard.
//!
//! `tower_http::cors::CorsLayer` answers every preflight with `200 OK` and
//! simply omits the `Access-Control-Allow-*` headers when the origin is not
//! allowed. This middleware runs in front of it and turns such preflights
//! into an explicit `400 CORS_REJECTED`, so misconfigured clients get a
//! readable answer.

use axum::extract::{Request, State};
use axum::http::header::{ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::CorsConfig;
use crate::error::ErrorBody;
use crate::state::AppState;

/// Reject preflight requests the configured policy would not allow.
pub async fn reject_disallowed_preflight(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        if let Some(reason) = preflight_rejection(&state.config.cors, request.headers()) {
            tracing::warn!(
                origin = ?request.headers().get(ORIGIN),
                reason,
                "Rejected CORS preflight"
            );
            return ErrorBody::new("CORS_REJECTED", reason).respond(StatusCode::BAD_REQUEST);
        }
    }
    next.run(request).await
}

/// Why a preflight with these headers must be rejected, if it must.
///
/// Requests that are not preflights (no `Origin` or no
/// `Access-Control-Request-Method`) are never rejected here.
pub fn preflight_rejection(cors: &CorsConfig, headers: &HeaderMap) -> Option<&'static str> {
    let origin = headers.get(ORIGIN)?;
    let requested_method = headers.get(ACCESS_CONTROL_REQUEST_METHOD)?;

    if !cors.origins.allows(origin) {
        return Some("Disallowed CORS origin");
    }

    let method_allowed = Method::from_bytes(requested_method.as_bytes())
        .map(|m| cors.methods.allows(&m))
        .unwrap_or(false);
    if !method_allowed {
        return Some("Disallowed CORS method");
    }

    if let Some(requested) = headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
        let headers_allowed = requested.to_str().is_ok_and(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .all(|h| {
                    h.parse::<HeaderName>()
                        .is_ok_and(|name| cors.headers.allows(&name))
                })
        });
        if !headers_allowed {
            return Some("Disallowed CORS headers");
        }
    }

    None
}
