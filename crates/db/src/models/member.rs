//! Project membership model and reconciliation outcome.

use serde::Serialize;
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};

/// A membership row from the `project_members` table.
/// Unique on (project_id, user_id).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub invited_at: Timestamp,
    pub joined_at: Timestamp,
}

/// Result of a reconciling add: which requested ids were inserted and
/// which were already members. "Nothing to add" is a success with an empty
/// `added` list, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub added: Vec<DbId>,
    pub skipped: Vec<DbId>,
}
