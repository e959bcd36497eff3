//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablero_core::status::TaskPriority;
use tablero_core::types::{DbId, Timestamp};
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task-assignee relation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskAssignee {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// Request body for creating a task.
///
/// Assignees must be the project owner or existing members at creation
/// time; the repository validates this once, inside the insert transaction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Defaults to MEDIA if omitted.
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
}

/// Request body for updating a task's non-status fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Timestamp>,
}
