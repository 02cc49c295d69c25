use axum::routing::post;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/location`.
///
/// ```text
/// POST /  -> update_location (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(location::update_location))
}
