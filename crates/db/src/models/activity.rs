//! Activity log entity model.
//!
//! Rows are immutable once created: this module defines no update or
//! delete DTO, and the repository exposes no such operation.

use serde::Serialize;
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};

/// A single activity log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    /// One of the enumerated [`tablero_core::activity::ActivityKind`] values.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Every logged event is scoped to a project.
    pub project_id: DbId,
    /// The actor on whose behalf the mutation ran (or the project owner
    /// when no actor was in context).
    pub user_id: DbId,
    /// Kind-specific metadata; `None` for kinds that carry none.
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// One page of a project's activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityPage {
    pub items: Vec<ActivityLog>,
    pub total: i64,
}
