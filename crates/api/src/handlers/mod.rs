//! Request handlers, one submodule per resource.
//!
//! Handlers deserialize and validate the request, authenticate the actor
//! via extractors, authorize against ownership/membership, then delegate to
//! the corresponding repository in `tablero_db`. Errors surface as
//! [`AppError`](crate::error::AppError).

use tablero_core::activity::ActorRef;
use tablero_core::error::CoreError;
use tablero_core::member::display_name;
use tablero_core::types::DbId;
use tablero_db::models::project::Project;
use tablero_db::repositories::{MemberRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

pub mod activity;
pub mod auth;
pub mod members;
pub mod notes;
pub mod payments;
pub mod projects;
pub mod tasks;
pub mod users;

/// Fetch a project or 404.
pub(crate) async fn fetch_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Require the actor to be the project owner, a member, or an admin.
///
/// Gate for project-scoped reads and for mutations open to members
/// (tasks, notes).
pub(crate) async fn require_project_access(
    state: &AppState,
    user: &AuthUser,
    project: &Project,
) -> AppResult<()> {
    if user.is_admin() || project.owner_id == user.user_id {
        return Ok(());
    }
    if MemberRepo::is_member(&state.pool, project.id, user.user_id).await? {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Not a member of this project".into(),
    )))
}

/// Require the actor to be the project owner or an admin.
///
/// Gate for status transitions, membership changes, payments, and
/// project update/delete.
pub(crate) fn require_project_owner(user: &AuthUser, project: &Project) -> AppResult<()> {
    if user.is_admin() || project.owner_id == user.user_id {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Only the project owner can do this".into(),
    )))
}

/// Resolve the acting user into the [`ActorRef`] carried by log metadata.
pub(crate) async fn resolve_actor(state: &AppState, user_id: DbId) -> AppResult<ActorRef> {
    let user = UserRepo::find_ref(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(ActorRef {
        user_id: user.id,
        user_name: display_name(user.name.as_deref(), &user.email),
    })
}
