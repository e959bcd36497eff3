//! Repository for the `tasks` and `task_assignees` tables, including task
//! creation and status transitions with their audit records.

use sqlx::PgPool;
use tablero_core::activity::{ActivityEvent, ActorRef};
use tablero_core::error::CoreError;
use tablero_core::status::{ensure_task_transition, TaskPriority, TaskStatus};
use tablero_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskAssignee, UpdateTask};
use crate::repositories::ActivityLogRepo;
use crate::DbError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, priority, due_date, \
                       version, created_at, updated_at";

/// Same list qualified with the `t.` alias, for joins against `projects`.
const COLUMNS_QUALIFIED: &str =
    "t.id, t.project_id, t.title, t.description, t.status, t.priority, t.due_date, \
     t.version, t.created_at, t.updated_at";

const ASSIGNEE_COLUMNS: &str = "id, task_id, user_id, created_at";

/// Provides CRUD operations and status transitions for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Create a task in a project, with its assignees and TASK_CREATED log,
    /// in one transaction.
    ///
    /// Every requested assignee must be the project owner or a current
    /// member. This is checked once here, at creation time, and not
    /// re-validated afterwards.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
        actor: &ActorRef,
    ) -> Result<Task, DbError> {
        let mut tx = pool.begin().await?;

        let owner_id = sqlx::query_scalar::<_, DbId>(
            "SELECT owner_id FROM projects WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

        if !input.assignee_ids.is_empty() {
            let members = sqlx::query_scalar::<_, DbId>(
                "SELECT user_id FROM project_members WHERE project_id = $1 AND user_id = ANY($2)",
            )
            .bind(project_id)
            .bind(&input.assignee_ids)
            .fetch_all(&mut *tx)
            .await?;

            let invalid: Vec<DbId> = input
                .assignee_ids
                .iter()
                .copied()
                .filter(|id| *id != owner_id && !members.contains(id))
                .collect();
            if !invalid.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Assignees must be the project owner or members; invalid: {invalid:?}"
                ))
                .into());
            }
        }

        let priority = input.priority.unwrap_or(TaskPriority::Media);
        let insert = format!(
            "INSERT INTO tasks (project_id, title, description, priority, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&insert)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(priority.as_str())
            .bind(input.due_date)
            .fetch_one(&mut *tx)
            .await?;

        for user_id in &input.assignee_ids {
            sqlx::query(
                "INSERT INTO task_assignees (task_id, user_id)
                 VALUES ($1, $2)
                 ON CONFLICT (task_id, user_id) DO NOTHING",
            )
            .bind(task.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        let event = ActivityEvent::TaskCreated(actor.clone());
        ActivityLogRepo::append(&mut *tx, project_id, actor.user_id, &event).await?;

        tx.commit().await?;
        Ok(task)
    }

    /// Find a task by ID. Tasks of soft-deleted projects are not found.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_QUALIFIED} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND p.deleted_at IS NULL"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List a task's assignees.
    pub async fn assignees(pool: &PgPool, task_id: DbId) -> Result<Vec<TaskAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSIGNEE_COLUMNS} FROM task_assignees WHERE task_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, TaskAssignee>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task's non-status fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                due_date = COALESCE($5, due_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Apply a status transition and, for CANCELADA, its audit record,
    /// atomically.
    ///
    /// Same shape as `ProjectRepo::transition`: legality check, version
    /// compare-and-swap, in-transaction log append. CANCELADA is the only
    /// task status with an enumerated log kind.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        target: TaskStatus,
        actor_id: DbId,
    ) -> Result<Task, DbError> {
        let mut tx = pool.begin().await?;

        let select = format!(
            "SELECT {COLUMNS_QUALIFIED} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND p.deleted_at IS NULL"
        );
        let task = sqlx::query_as::<_, Task>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound { entity: "Task", id })?;

        let current = TaskStatus::parse(&task.status)?;
        ensure_task_transition(current, target)?;

        let update = format!(
            "UPDATE tasks SET status = $3, version = version + 1, updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Task>(&update)
            .bind(id)
            .bind(task.version)
            .bind(target.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!("Task {id} was modified concurrently; retry"))
            })?;

        if target == TaskStatus::Cancelada {
            ActivityLogRepo::append(
                &mut *tx,
                task.project_id,
                actor_id,
                &ActivityEvent::TaskStatusCancel,
            )
            .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}
