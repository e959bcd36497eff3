//! Handlers for project payments.
//!
//! Payments are plain records outside the activity-log vocabulary;
//! creating one writes no log entry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tablero_core::types::DbId;
use tablero_db::models::payment::{CreatePayment, Payment};
use tablero_db::repositories::PaymentRepo;
use validator::Validate;

use super::{fetch_project, require_project_access, require_project_owner};
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/payments
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let project = fetch_project(&state, id).await?;
    require_project_access(&state, &user, &project).await?;

    let payments = PaymentRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(payments)))
}

/// POST /api/v1/projects/{id}/payments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    input.validate()?;
    let project = fetch_project(&state, id).await?;
    require_project_owner(&user, &project)?;

    let payment = PaymentRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}
