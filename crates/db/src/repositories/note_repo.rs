//! Repository for the `notes` table.

use sqlx::PgPool;
use tablero_core::activity::{ActivityEvent, ActorRef};
use tablero_core::error::CoreError;
use tablero_core::types::DbId;

use crate::models::note::{CreateNote, Note};
use crate::repositories::ActivityLogRepo;
use crate::DbError;

const COLUMNS: &str = "id, project_id, author_id, content, created_at";

/// Note creation and listing. Creation appends a COMMENT_ADDED log entry
/// in the same transaction.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note and its COMMENT_ADDED log atomically.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateNote,
        author: &ActorRef,
    ) -> Result<Note, DbError> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM projects WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }
            .into());
        }

        let insert = format!(
            "INSERT INTO notes (project_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&insert)
            .bind(project_id)
            .bind(author.user_id)
            .bind(&input.content)
            .fetch_one(&mut *tx)
            .await?;

        let event = ActivityEvent::CommentAdded(author.clone());
        ActivityLogRepo::append(&mut *tx, project_id, author.user_id, &event).await?;

        tx.commit().await?;
        Ok(note)
    }

    /// List a project's notes, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notes WHERE project_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Note>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
