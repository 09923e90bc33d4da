//! OpenAPI document describing the HTTP surface.

use axum::Router;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::error::ErrorBody;
use crate::handlers;
use crate::response::{CountResponse, HealthResponse, ProbeResponse};
use crate::state::AppState;
use starter_db::models::item::{CreateItem, Item, UpdateItem};

/// Where the generated document is served.
pub const OPENAPI_PATH: &str = "/openapi.json";
/// Swagger UI.
pub const DOCS_PATH: &str = "/docs";
/// ReDoc.
pub const REDOC_PATH: &str = "/redoc";

/// Operations mounted under the versioned API prefix.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::items::create,
        handlers::items::list,
        handlers::items::count,
        handlers::items::get_by_id,
        handlers::items::update,
        handlers::items::delete,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::health::liveness_check,
    ),
    components(schemas(
        Item,
        CreateItem,
        UpdateItem,
        CountResponse,
        HealthResponse,
        ProbeResponse,
        ErrorBody,
    )),
    tags(
        (name = "items", description = "Item management"),
        (name = "health", description = "Health and readiness probes"),
    )
)]
struct VersionedApi;

/// Probes that are also mounted at the root.
#[derive(OpenApi)]
#[openapi(paths(
    handlers::health::health_check,
    handlers::health::readiness_check,
    handlers::health::liveness_check,
))]
struct RootApi;

/// Assemble the full document, titled and versioned from configuration.
pub fn build_openapi(config: &ServerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = RootApi::openapi().nest(config.api_prefix.as_str(), VersionedApi::openapi());
    doc.info.title = config.app_name.clone();
    doc.info.version = config.app_version.clone();
    doc.info.description = Some(config.app_description.clone());
    doc
}

/// Swagger UI at [`DOCS_PATH`], ReDoc at [`REDOC_PATH`] and the raw document
/// at [`OPENAPI_PATH`]. The document is built once, when the router is.
pub fn docs_router(config: &ServerConfig) -> Router<AppState> {
    let doc = build_openapi(config);
    Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, doc.clone()))
        .merge(Redoc::with_url(REDOC_PATH, doc))
}
