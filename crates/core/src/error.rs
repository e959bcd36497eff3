//! Domain error taxonomy shared by the db and api layers.

use crate::types::DbId;

/// Domain-level error. The api layer maps each variant to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is soft-deleted).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A status change was requested that the transition rules reject.
    ///
    /// Covers the "already in that state" case: re-applying the current
    /// status (including re-completing or re-cancelling a terminal entity)
    /// is an error, not an idempotent success.
    #[error("{entity} cannot move from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    /// Request shape or field values failed validation.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness or concurrent-modification conflict.
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid actor context.
    #[error("{0}")]
    Unauthorized(String),

    /// The actor is authenticated but lacks the required role or membership.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, never leaked.
    #[error("{0}")]
    Internal(String),
}
