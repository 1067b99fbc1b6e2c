use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected before anything is persisted (bad month, year, or date range).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backing store was unreachable or refused a write.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
