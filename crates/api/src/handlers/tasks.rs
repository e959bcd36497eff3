//! Handlers for tasks, nested under a project for creation/listing and
//! top-level for single-task operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tablero_core::error::CoreError;
use tablero_core::status::TaskStatus;
use tablero_core::types::DbId;
use tablero_db::models::task::{CreateTask, Task, TaskAssignee, UpdateTask};
use tablero_db::repositories::TaskRepo;
use validator::Validate;

use super::{fetch_project, require_project_access, resolve_actor};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the generic transition endpoint.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: TaskStatus,
}

/// A task together with its assignees, returned by single-task reads.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub assignees: Vec<TaskAssignee>,
}

/// POST /api/v1/projects/{id}/tasks
///
/// Create a task, validate its assignees against ownership/membership,
/// and append the TASK_CREATED log, all in one transaction.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let actor = resolve_actor(&state, user.user_id).await?;
    let task = TaskRepo::create(&state.pool, id, &input, &actor).await?;
    tracing::info!(task_id = task.id, project_id = id, actor_id = user.user_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/projects/{id}/tasks
pub async fn list_for_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let tasks = TaskRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(tasks)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let task = fetch_task(&state, &user, id).await?;
    let assignees = TaskRepo::assignees(&state.pool, id).await?;
    Ok(Json(TaskDetail { task, assignees }))
}

/// PUT /api/v1/tasks/{id}
///
/// Update non-status fields. Status only changes through the transition
/// endpoints below.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    input.validate()?;
    fetch_task(&state, &user, id).await?;

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// POST /api/v1/tasks/{id}/cancel
///
/// Transition to CANCELADA, appending the TASK_STATUS_CANCEL log
/// atomically.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    fetch_task(&state, &user, id).await?;

    let task = TaskRepo::transition(&state.pool, id, TaskStatus::Cancelada, user.user_id).await?;
    Ok(Json(task))
}

/// POST /api/v1/tasks/{id}/status
///
/// Generic transition. Only CANCELADA has an enumerated log kind; other
/// legal transitions apply silently.
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<Task>> {
    fetch_task(&state, &user, id).await?;

    let task = TaskRepo::transition(&state.pool, id, input.status, user.user_id).await?;
    tracing::info!(
        task_id = id,
        actor_id = user.user_id,
        status = %input.status,
        "Task status changed"
    );
    Ok(Json(task))
}

/// Fetch a task and authorize the actor against its parent project.
async fn fetch_task(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Task> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let project = fetch_project(state, task.project_id).await?;
    require_project_access(state, user, &project).await?;
    Ok(task)
}
