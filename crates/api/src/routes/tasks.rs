//! Route definitions for top-level single-task operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET  /{id}         -> get_by_id (with assignees)
/// PUT  /{id}         -> update (non-status fields)
/// POST /{id}/cancel  -> transition to CANCELADA
/// POST /{id}/status  -> generic transition { "status": ... }
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(tasks::get_by_id).put(tasks::update))
        .route("/{id}/cancel", post(tasks::cancel))
        .route("/{id}/status", post(tasks::set_status))
}
