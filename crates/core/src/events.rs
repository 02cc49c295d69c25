//! Events: physical-world points of interest that daily tasks are bound to.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::types::{DbId, Timestamp};

/// The closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Karaoke,
    Concert,
    Museum,
    Aperitif,
    Club,
    Theater,
    Restaurant,
}

impl EventCategory {
    pub const ALL: [EventCategory; 7] = [
        Self::Karaoke,
        Self::Concert,
        Self::Museum,
        Self::Aperitif,
        Self::Club,
        Self::Theater,
        Self::Restaurant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Karaoke => "karaoke",
            Self::Concert => "concert",
            Self::Museum => "museum",
            Self::Aperitif => "aperitif",
            Self::Club => "club",
            Self::Theater => "theater",
            Self::Restaurant => "restaurant",
        }
    }

    /// Parse a stored category name. Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known rarity tiers.
///
/// Events keep their rarity as raw text so tiers added by the content
/// pipeline later still load; see [`rarity_multiplier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRarity {
    Common,
    Rare,
    VeryRare,
}

impl EventRarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::VeryRare => "very_rare",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "very_rare" => Some(Self::VeryRare),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Rare => 1.5,
            Self::VeryRare => 2.0,
        }
    }
}

/// Point multiplier for a stored rarity value. Unknown tiers score as common.
pub fn rarity_multiplier(rarity: &str) -> f64 {
    EventRarity::parse(rarity).map_or(1.0, |r| r.multiplier())
}

/// Where an event record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    InstagramPost,
    GoogleSearch,
    ManualAdmin,
    UserSubmitted,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InstagramPost => "instagram_post",
            Self::GoogleSearch => "google_search",
            Self::ManualAdmin => "manual_admin",
            Self::UserSubmitted => "user_submitted",
        }
    }
}

/// An event as seen by the discovery and claim engine.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: GeoPoint,
    pub address: String,
    pub city: String,
    pub event_date: Timestamp,
    pub duration_minutes: i32,
    pub rarity: String,
    pub active: bool,
}

impl Event {
    pub fn rarity_multiplier(&self) -> f64 {
        rarity_multiplier(&self.rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_for_known_tiers() {
        assert_eq!(rarity_multiplier("common"), 1.0);
        assert_eq!(rarity_multiplier("rare"), 1.5);
        assert_eq!(rarity_multiplier("very_rare"), 2.0);
    }

    #[test]
    fn unknown_rarity_defaults_to_one() {
        assert_eq!(rarity_multiplier("legendary"), 1.0);
        assert_eq!(rarity_multiplier(""), 1.0);
        assert_eq!(rarity_multiplier("RARE"), 1.0);
    }

    #[test]
    fn category_names_round_trip() {
        for category in EventCategory::ALL {
            assert_eq!(EventCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(EventCategory::parse("opera"), None);
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&EventCategory::Aperitif).unwrap();
        assert_eq!(json, "\"aperitif\"");
    }
}
