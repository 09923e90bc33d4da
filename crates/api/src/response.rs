//! Response payloads shared by handlers and the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "count": n }` payload of count endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

/// Payload of `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
    /// Swagger UI.
    pub docs: String,
    /// ReDoc.
    pub redoc: String,
    /// Raw OpenAPI document.
    pub openapi: String,
}

/// Payload of the `/health` endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: String,
    pub app_name: String,
    pub version: String,
    pub environment: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: starter_core::types::Timestamp,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// Payload of the `/ready` and `/live` probes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponse {
    pub status: String,
}
