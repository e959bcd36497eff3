//! Refresh-token session model.

use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};

/// A refresh session row. Only the SHA-256 hash of the opaque refresh
/// token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
