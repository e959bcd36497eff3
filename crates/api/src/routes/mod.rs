//! Route tree for the `/api/v1` surface.

pub mod admin;
pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get (admin only)
///
/// /projects                          list, create
/// /projects/{id}                     get, update, soft delete
/// /projects/{id}/complete            transition to COMPLETADO (POST)
/// /projects/{id}/cancel              transition to CANCELADO (POST)
/// /projects/{id}/activity            activity feed (GET)
/// /projects/{id}/members             list, reconciling add
/// /projects/{id}/members/{member_id} remove (DELETE)
/// /projects/{id}/notes               list, create
/// /projects/{id}/payments            list, create
/// /projects/{id}/tasks               list, create
///
/// /tasks/{id}                        get, update
/// /tasks/{id}/cancel                 transition to CANCELADA (POST)
/// /tasks/{id}/status                 generic transition (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
}
