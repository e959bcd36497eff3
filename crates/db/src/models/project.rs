//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};
use validator::Validate;

/// A project row from the `projects` table.
///
/// `status` holds one of the TEXT values of
/// [`tablero_core::status::ProjectStatus`]; `version` is the optimistic
/// concurrency counter bumped by every status transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub owner_id: DbId,
    pub completed_at: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a project. The owner is the acting user,
/// never a body field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Request body for updating a project. Status is excluded on purpose:
/// it only changes through the transition endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
