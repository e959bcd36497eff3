//! Handlers for project membership, including the reconciling add.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tablero_core::error::CoreError;
use tablero_core::member::{normalize_member_ids, MemberIds};
use tablero_core::types::DbId;
use tablero_db::models::member::{ProjectMember, ReconcileOutcome};
use tablero_db::repositories::MemberRepo;

use super::{fetch_project, require_project_access, require_project_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/members
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectMember>>>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let members = MemberRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(members)))
}

/// Request body for the reconciling add. `user_ids` accepts a single id or
/// a list via the untagged [`MemberIds`].
#[derive(Debug, Deserialize)]
pub struct AddMembersRequest {
    pub user_ids: MemberIds,
}

/// POST /api/v1/projects/{id}/members
///
/// Reconciling add: `{ "user_ids": 5 }` and `{ "user_ids": [5, 6] }` both
/// work. Already-present ids are reported as skipped, never as errors, so
/// the operation is idempotent.
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddMembersRequest>,
) -> AppResult<Json<ReconcileOutcome>> {
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    let requested = normalize_member_ids(&input.user_ids);
    let outcome = MemberRepo::add_members(&state.pool, id, &requested, user.user_id).await?;
    tracing::info!(
        project_id = id,
        actor_id = user.user_id,
        added = outcome.added.len(),
        skipped = outcome.skipped.len(),
        "Membership reconciled"
    );
    Ok(Json(outcome))
}

/// DELETE /api/v1/projects/{id}/members/{member_id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    // The membership must belong to the project in the path.
    let members = MemberRepo::list_for_project(&state.pool, id).await?;
    if !members.iter().any(|m| m.id == member_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectMember",
            id: member_id,
        }));
    }

    MemberRepo::remove_member(&state.pool, member_id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
