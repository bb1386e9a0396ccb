use crate::types::DbId;

/// Failures raised by lab domain rules, independent of the transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// No signed-in user where one is required.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Signed in, but the identity may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
