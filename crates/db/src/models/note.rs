//! Project note (comment) model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};
use validator::Validate;

/// A note row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// Request body for creating a note.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}
