//! Route definitions for the caller's preference document.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Routes mounted at `/preferences`. All require auth.
///
/// ```text
/// GET    /        -> get_preferences
/// PUT    /        -> update_preferences
/// POST   /setup   -> setup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        .route("/setup", post(preferences::setup))
}
