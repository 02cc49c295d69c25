pub mod auth;
pub mod health;
pub mod location;
pub mod preferences;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public)
/// /auth/login                       login (public)
/// /auth/me                          current user (requires auth)
///
/// /preferences                      get, replace sections
/// /preferences/setup                one-time creation
///
/// /location                         report current location
///
/// /tasks/today                      nearby tasks (?lat&lng&show_all)
/// /tasks/{task_id}/claim            claim a task
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/preferences", preferences::router())
        .nest("/location", location::router())
        .nest("/tasks", tasks::router())
}
