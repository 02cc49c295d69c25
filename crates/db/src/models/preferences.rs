//! Preference document model and DTOs.
//!
//! The three sections are stored as JSONB and decoded straight into the
//! typed `explora_core::preferences` structs.

use explora_core::preferences::{EventPreferences, Preferences, Profile, TravelPreferences};
use explora_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserPreferences {
    pub id: DbId,
    pub user_id: DbId,
    pub profile: Json<Profile>,
    pub travel_preferences: Json<TravelPreferences>,
    pub event_preferences: Json<EventPreferences>,
    pub share_profile: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserPreferences> for Preferences {
    fn from(row: UserPreferences) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            profile: row.profile.0,
            travel_preferences: row.travel_preferences.0,
            event_preferences: row.event_preferences.0,
            share_profile: row.share_profile,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for the one-time preference setup.
#[derive(Debug)]
pub struct CreatePreferences {
    pub user_id: DbId,
    pub profile: Profile,
    pub travel_preferences: TravelPreferences,
    pub event_preferences: EventPreferences,
    pub share_profile: bool,
}

/// Section replacement. `None` leaves the stored section untouched.
#[derive(Debug, Default)]
pub struct UpdatePreferences {
    pub profile: Option<Profile>,
    pub travel_preferences: Option<TravelPreferences>,
    pub event_preferences: Option<EventPreferences>,
    pub share_profile: Option<bool>,
}
