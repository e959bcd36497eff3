//! Handler for a project's activity feed.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tablero_core::types::DbId;
use tablero_db::models::activity::ActivityPage;
use tablero_db::repositories::ActivityLogRepo;

use super::{fetch_project, require_project_access};
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Page size, clamped to 1..=500 by the repository (default 50).
    pub limit: Option<i64>,
    /// Rows to skip (default 0).
    pub offset: Option<i64>,
}

/// GET /api/v1/projects/{id}/activity
///
/// Newest-first page of the project's immutable activity log, with the
/// total count for pagination.
pub async fn feed(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<DataResponse<ActivityPage>>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);

    let items = ActivityLogRepo::list_for_project(&state.pool, id, limit, offset).await?;
    let total = ActivityLogRepo::count_for_project(&state.pool, id).await?;

    Ok(Json(DataResponse::new(ActivityPage { items, total })))
}
