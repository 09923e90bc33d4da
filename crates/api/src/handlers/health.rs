//! Liveness, readiness and health probes, plus the root welcome payload.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::openapi;
use crate::response::{HealthResponse, ProbeResponse, WelcomeResponse};
use crate::state::AppState;

/// GET /health -- service metadata and database reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = starter_db::health_check(&state.pool).await.is_ok();
    let config = &state.config;

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" }.to_string(),
        app_name: config.app_name.clone(),
        version: config.app_version.clone(),
        environment: config.environment.to_string(),
        timestamp: chrono::Utc::now(),
        db_healthy,
    })
}

/// GET /ready -- 503 until the database answers.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve traffic", body = ProbeResponse),
        (status = 503, description = "Database unreachable", body = ProbeResponse),
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ProbeResponse>) {
    match starter_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, probe("ready")),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, probe("degraded"))
        }
    }
}

/// GET /live -- the process is up and serving requests.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Process alive", body = ProbeResponse))
)]
pub async fn liveness_check() -> Json<ProbeResponse> {
    probe("alive")
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {}", state.config.app_name),
        version: state.config.app_version.clone(),
        docs: openapi::DOCS_PATH.to_string(),
        redoc: openapi::REDOC_PATH.to_string(),
        openapi: openapi::OPENAPI_PATH.to_string(),
    })
}

fn probe(status: &str) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: status.to_string(),
    })
}
