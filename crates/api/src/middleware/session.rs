//! Request-scoped database session extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use starter_db::DbSession;

use crate::state::AppState;

/// Every handler that takes a `DbSession` gets a fresh one bound to the
/// shared pool. No connection is checked out until the session is first used.
impl FromRequestParts<AppState> for DbSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbSession::new(state.pool.clone()))
    }
}
