//! Handlers for the caller's preference document.
//!
//! Setup is one-time; later edits go through `PUT`, which replaces whole
//! sections.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use explora_core::error::CoreError;
use explora_core::preferences::{
    validate_event_preferences, validate_profile, EventPreferences, Preferences, Profile,
    TravelPreferences,
};
use explora_db::models::preferences::{CreatePreferences, UpdatePreferences};
use explora_db::repositories::{PreferencesRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /preferences/setup`.
#[derive(Debug, Deserialize)]
pub struct SetupPreferencesRequest {
    pub profile: Profile,
    #[serde(default)]
    pub travel_preferences: TravelPreferences,
    pub event_preferences: EventPreferences,
    #[serde(default)]
    pub share_profile: bool,
}

/// Request body for `PUT /preferences`. Omitted sections are kept.
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub profile: Option<Profile>,
    pub travel_preferences: Option<TravelPreferences>,
    pub event_preferences: Option<EventPreferences>,
    pub share_profile: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/preferences/setup
///
/// Create the caller's preference document and link it from the user row in
/// one transaction. 409 if the caller already has one.
pub async fn setup(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SetupPreferencesRequest>,
) -> AppResult<impl IntoResponse> {
    validate_profile(&input.profile)?;
    validate_event_preferences(&input.event_preferences)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    if user.preferences_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Preferences already set up".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    // Two racing setups both pass the check above; the loser trips
    // `uq_user_preferences_user` and gets a 409.
    let created = PreferencesRepo::create(
        &mut *tx,
        &CreatePreferences {
            user_id: user.id,
            profile: input.profile,
            travel_preferences: input.travel_preferences,
            event_preferences: input.event_preferences,
            share_profile: input.share_profile,
        },
    )
    .await?;
    UserRepo::link_preferences(&mut *tx, user.id, created.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, preferences_id = created.id, "Preferences set up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: Preferences::from(created),
        }),
    ))
}

/// GET /api/v1/preferences
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let prefs = PreferencesRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Preferences for user",
            id: auth.user_id,
        })?;

    Ok(Json(DataResponse {
        data: Preferences::from(prefs),
    }))
}

/// PUT /api/v1/preferences
pub async fn update_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdatePreferencesRequest>,
) -> AppResult<impl IntoResponse> {
    if input.profile.is_none()
        && input.travel_preferences.is_none()
        && input.event_preferences.is_none()
        && input.share_profile.is_none()
    {
        return Err(AppError::BadRequest(
            "At least one preference section must be provided".into(),
        ));
    }
    if let Some(profile) = &input.profile {
        validate_profile(profile)?;
    }
    if let Some(event_preferences) = &input.event_preferences {
        validate_event_preferences(event_preferences)?;
    }

    let updated = PreferencesRepo::update(
        &state.pool,
        auth.user_id,
        &UpdatePreferences {
            profile: input.profile,
            travel_preferences: input.travel_preferences,
            event_preferences: input.event_preferences,
            share_profile: input.share_profile,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Preferences for user",
        id: auth.user_id,
    })?;

    tracing::info!(user_id = auth.user_id, "Preferences updated");

    Ok(Json(DataResponse {
        data: Preferences::from(updated),
    }))
}
