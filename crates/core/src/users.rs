//! Players as seen by the discovery and claim engine.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Default city assigned at signup.
pub const DEFAULT_CITY: &str = "catania";

/// Last reported position of a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentLocation {
    pub lat: f64,
    pub lng: f64,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub current_location: CurrentLocation,
    pub city: String,
    /// Link to the user's preference document, if one was set up.
    pub preferences_id: Option<DbId>,
    pub total_score: i64,
}
