//! Route definitions for task discovery and claims.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`. All require auth.
///
/// ```text
/// GET  /today              -> today
/// POST /{task_id}/claim    -> claim_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/today", get(tasks::today))
        .route("/{task_id}/claim", post(tasks::claim_task))
}
