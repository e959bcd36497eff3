//! Handlers for the `/projects` resource, including the status transition
//! endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tablero_core::error::CoreError;
use tablero_core::status::ProjectStatus;
use tablero_core::types::DbId;
use tablero_db::models::project::{CreateProject, Project, UpdateProject};
use tablero_db::repositories::ProjectRepo;
use validator::Validate;

use super::{fetch_project, require_project_access, require_project_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// Create a project owned by the acting user, starting in PENDIENTE.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, &input, user.user_id).await?;
    tracing::info!(project_id = project.id, owner_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Admins see every project; everyone else sees projects they own or
/// belong to.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = if user.is_admin() {
        ProjectRepo::list(&state.pool).await?
    } else {
        ProjectRepo::list_for_user(&state.pool, user.user_id).await?
    };
    Ok(Json(DataResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
///
/// Update name/description. Status never changes here; use the
/// `/complete` and `/cancel` endpoints.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft delete. Activity logs referencing the project are retained.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    let deleted = ProjectRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = id, actor_id = user.user_id, "Project soft-deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// POST /api/v1/projects/{id}/complete
///
/// Transition to COMPLETADO, stamping `completed_at` and appending the
/// PROJECT_COMPLETE log atomically.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(state, user, id, ProjectStatus::Completado).await
}

/// POST /api/v1/projects/{id}/cancel
///
/// Transition to CANCELADO, appending the PROJECT_CANCEL log atomically.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(state, user, id, ProjectStatus::Cancelado).await
}

async fn transition(
    state: AppState,
    user: AuthUser,
    id: DbId,
    target: ProjectStatus,
) -> AppResult<Json<Project>> {
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    let updated = ProjectRepo::transition(&state.pool, id, target, user.user_id).await?;
    tracing::info!(
        project_id = id,
        actor_id = user.user_id,
        status = %target,
        "Project status changed"
    );
    Ok(Json(updated))
}
