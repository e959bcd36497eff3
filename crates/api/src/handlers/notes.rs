//! Handlers for project notes (comments).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tablero_core::types::DbId;
use tablero_db::models::note::{CreateNote, Note};
use tablero_db::repositories::NoteRepo;
use validator::Validate;

use super::{fetch_project, require_project_access, resolve_actor};
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/notes
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Note>>>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let notes = NoteRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(notes)))
}

/// POST /api/v1/projects/{id}/notes
///
/// Insert the note and its COMMENT_ADDED log in one transaction.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    input.validate()?;
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let author = resolve_actor(&state, user.user_id).await?;
    let note = NoteRepo::create(&state.pool, id, &input, &author).await?;
    Ok((StatusCode::CREATED, Json(note)))
}
