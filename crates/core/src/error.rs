/// Domain-level error returned by the service layer.
///
/// Carries no HTTP knowledge; `starter-api` maps each variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The identifier is kept as text so malformed ids can be reported verbatim.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
