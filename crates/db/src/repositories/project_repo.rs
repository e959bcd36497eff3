//! Repository for the `projects` table, including the status transition
//! orchestration.

use sqlx::PgPool;
use tablero_core::activity::ActivityEvent;
use tablero_core::error::CoreError;
use tablero_core::status::{ensure_project_transition, ProjectStatus};
use tablero_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::ActivityLogRepo;
use crate::DbError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, owner_id, completed_at, deleted_at, \
                       version, created_at, updated_at";

/// Provides CRUD operations and status transitions for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, starting in PENDIENTE.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        owner_id: DbId,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects a user owns or is a member of, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL
               AND (owner_id = $1 OR id IN
                    (SELECT project_id FROM project_members WHERE user_id = $1))
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all projects. Admin view.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE deleted_at IS NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update name/description. Only non-`None` fields are applied.
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project. Returns `true` if a row was marked deleted.
    /// Activity logs referencing the project are retained as history.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a status transition and its audit record atomically.
    ///
    /// Inside one transaction: read the current row, check legality
    /// (same-status requests are rejected), compare-and-swap on `version`,
    /// stamp `completed_at` only when the target is COMPLETADO, and append
    /// the corresponding log entry attributed to `actor_id`. A version
    /// mismatch from a concurrent transition surfaces as
    /// [`CoreError::Conflict`]; nothing is applied on any failure.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        target: ProjectStatus,
        actor_id: DbId,
    ) -> Result<Project, DbError> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        let project = sqlx::query_as::<_, Project>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id,
            })?;

        let current = ProjectStatus::parse(&project.status)?;
        ensure_project_transition(current, target)?;

        let update = format!(
            "UPDATE projects SET
                status = $3,
                completed_at = CASE WHEN $3 = 'COMPLETADO' THEN NOW() ELSE completed_at END,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&update)
            .bind(id)
            .bind(project.version)
            .bind(target.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!("Project {id} was modified concurrently; retry"))
            })?;

        let event = match target {
            ProjectStatus::Completado => Some(ActivityEvent::ProjectComplete),
            ProjectStatus::Cancelado => Some(ActivityEvent::ProjectCancel),
            ProjectStatus::Pendiente | ProjectStatus::EnProgreso => None,
        };
        if let Some(event) = event {
            ActivityLogRepo::append(&mut *tx, id, actor_id, &event).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}
