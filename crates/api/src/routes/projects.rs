//! Route definitions for the `/projects` resource and its project-scoped
//! sub-resources (activity, members, notes, payments, tasks).

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{activity, members, notes, payments, projects, tasks};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete (soft)
///
/// POST   /{id}/complete             -> transition to COMPLETADO
/// POST   /{id}/cancel               -> transition to CANCELADO
/// GET    /{id}/activity             -> paginated activity feed
///
/// GET    /{id}/members              -> list
/// POST   /{id}/members              -> reconciling add
/// DELETE /{id}/members/{member_id}  -> remove
///
/// GET    /{id}/notes                -> list
/// POST   /{id}/notes                -> create (emits COMMENT_ADDED)
///
/// GET    /{id}/payments             -> list
/// POST   /{id}/payments             -> create (no log entry)
///
/// GET    /{id}/tasks                -> list
/// POST   /{id}/tasks                -> create (emits TASK_CREATED)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/complete", post(projects::complete))
        .route("/{id}/cancel", post(projects::cancel))
        .route("/{id}/activity", get(activity::feed))
        .route("/{id}/members", get(members::list).post(members::add))
        .route("/{id}/members/{member_id}", delete(members::remove))
        .route("/{id}/notes", get(notes::list).post(notes::create))
        .route("/{id}/payments", get(payments::list).post(payments::create))
        .route(
            "/{id}/tasks",
            get(tasks::list_for_project).post(tasks::create),
        )
}
