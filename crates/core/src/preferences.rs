//! User preference documents and the two predicates the engine derives
//! from them.
//!
//! - [`is_category_preferred`] drives discovery filtering (numeric affinity
//!   threshold).
//! - [`is_favorite_category`] drives the claim bonus (fixed favorites set).
//!
//! They read different fields and are not interchangeable.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::{Event, EventCategory};
use crate::types::{DbId, Timestamp};

/// Affinity score a category must strictly exceed to survive discovery
/// filtering.
pub const CATEGORY_AFFINITY_THRESHOLD: i32 = 30;

/// Inclusive upper bound of a category affinity score.
pub const MAX_CATEGORY_AFFINITY: i32 = 100;

/// Maximum number of top favorite categories.
pub const MAX_TOP_FAVORITES: usize = 3;

/// Upper bound accepted for `profile.age`.
pub const MAX_AGE: i32 = 150;

const DEFAULT_DAILY_BUDGET: f64 = 50.0;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPace {
    Slow,
    #[default]
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    Cold,
    Warm,
    #[default]
    Moderate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    Hostel,
    #[default]
    Airbnb,
    Hotel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSize {
    #[default]
    Solo,
    Couple,
    SmallGroup,
    LargeGroup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    #[default]
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrSolo {
    GroupActivity,
    SoloExploration,
    #[default]
    Both,
}

// ---------------------------------------------------------------------------
// Document sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: i32,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub favorite_activities: Vec<String>,
    #[serde(default)]
    pub music_genres: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default = "default_daily_budget")]
    pub average_daily_budget: f64,
}

fn default_daily_budget() -> f64 {
    DEFAULT_DAILY_BUDGET
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPreferences {
    pub preferred_climate: Climate,
    pub travel_pace: TravelPace,
    pub accommodation_type: AccommodationType,
    pub group_size: GroupSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPreferences {
    /// Affinity per category, 0 to 100. Missing categories count as 0.
    #[serde(default)]
    pub categories: BTreeMap<EventCategory, i32>,
    pub top_3_favorites: Vec<EventCategory>,
    #[serde(default)]
    pub preferred_time: PreferredTime,
    #[serde(default)]
    pub group_or_solo: GroupOrSolo,
}

impl EventPreferences {
    pub fn affinity(&self, category: EventCategory) -> i32 {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

/// A stored preference document (one per user at most).
#[derive(Debug, Clone, Serialize)]
pub struct Preferences {
    pub id: DbId,
    pub user_id: DbId,
    pub profile: Profile,
    pub travel_preferences: TravelPreferences,
    pub event_preferences: EventPreferences,
    pub share_profile: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Discovery filter: the event's category affinity is strictly above
/// [`CATEGORY_AFFINITY_THRESHOLD`].
pub fn is_category_preferred(preferences: &Preferences, event: &Event) -> bool {
    preferences.event_preferences.affinity(event.category) > CATEGORY_AFFINITY_THRESHOLD
}

/// Claim bonus eligibility: the event's category is one of the top favorites.
pub fn is_favorite_category(preferences: &Preferences, event: &Event) -> bool {
    preferences
        .event_preferences
        .top_3_favorites
        .contains(&event.category)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A favorites list must hold between one and [`MAX_TOP_FAVORITES`] entries.
pub fn validate_top3_favorites<T>(favorites: &[T]) -> bool {
    !favorites.is_empty() && favorites.len() <= MAX_TOP_FAVORITES
}

pub fn validate_event_preferences(prefs: &EventPreferences) -> Result<(), CoreError> {
    if !validate_top3_favorites(&prefs.top_3_favorites) {
        return Err(CoreError::Validation(
            "top_3_favorites must have 1-3 items".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &prefs.top_3_favorites {
        if !seen.insert(category) {
            return Err(CoreError::Validation(format!(
                "top_3_favorites lists '{category}' more than once"
            )));
        }
    }

    for (category, score) in &prefs.categories {
        if !(0..=MAX_CATEGORY_AFFINITY).contains(score) {
            return Err(CoreError::Validation(format!(
                "Affinity for '{category}' must be between 0 and {MAX_CATEGORY_AFFINITY}, got {score}"
            )));
        }
    }

    Ok(())
}

pub fn validate_profile(profile: &Profile) -> Result<(), CoreError> {
    if !(0..=MAX_AGE).contains(&profile.age) {
        return Err(CoreError::Validation(format!(
            "age must be between 0 and {MAX_AGE}, got {}",
            profile.age
        )));
    }
    if !profile.average_daily_budget.is_finite() || profile.average_daily_budget < 0.0 {
        return Err(CoreError::Validation(
            "average_daily_budget must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
