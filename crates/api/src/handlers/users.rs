//! Handlers for the admin-only `/admin/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tablero_core::error::CoreError;
use tablero_core::roles::{self, ROLE_USER};
use tablero_core::types::DbId;
use tablero_db::models::user::{CreateUser, NewUser, User};
use tablero_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/users
///
/// Create a user account. The plaintext password is hashed here; the
/// repository only ever sees the Argon2id hash.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;

    let role = input.role.as_deref().unwrap_or(ROLE_USER);
    if !roles::VALID_ROLES.contains(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            roles::VALID_ROLES.join(", ")
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let new_user = NewUser {
        email: input.email,
        name: input.name,
        password_hash,
        role: role.to_string(),
    };
    let user = UserRepo::create(&state.pool, &new_user).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(users)))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}
