//! Handler for reporting the caller's current location.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use explora_core::error::CoreError;
use explora_core::geo::validate_coordinates;
use explora_core::users::CurrentLocation;
use explora_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub current_location: CurrentLocation,
}

/// POST /api/v1/location
pub async fn update_location(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<LocationRequest>,
) -> AppResult<impl IntoResponse> {
    let point = validate_coordinates(input.lat, input.lng)?;

    let user = UserRepo::update_location(&state.pool, auth.user_id, point.lat, point.lng)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    tracing::debug!(user_id = user.id, lat = point.lat, lng = point.lng, "Location updated");

    Ok(Json(DataResponse {
        data: LocationResponse {
            current_location: user.current_location(),
        },
    }))
}
