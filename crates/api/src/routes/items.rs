//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /stats/count         -> count
/// GET    /{item_id}           -> get_by_id
/// PATCH  /{item_id}           -> update
/// DELETE /{item_id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list).post(items::create))
        .route("/stats/count", get(items::count))
        .route(
            "/{item_id}",
            get(items::get_by_id)
                .patch(items::update)
                .delete(items::delete),
        )
}
