pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Build the versioned API route tree, mounted under `API_V1_PREFIX`.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service health
/// /ready                                           readiness probe
/// /live                                            liveness probe
///
/// /items                                           list, create
/// /items/stats/count                               count
/// /items/{item_id}                                 get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/items", items::router())
}
