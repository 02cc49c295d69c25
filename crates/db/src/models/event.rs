//! Event entity model and DTOs.

use explora_core::events::{self, EventCategory, EventSource};
use explora_core::geo::GeoPoint;
use explora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub city: String,
    pub event_date: Timestamp,
    pub duration_minutes: i32,
    pub rarity: String,
    pub source: String,
    pub source_url: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
}

impl TryFrom<Event> for events::Event {
    type Error = String;

    fn try_from(row: Event) -> Result<Self, Self::Error> {
        let category = EventCategory::parse(&row.category)
            .ok_or_else(|| format!("event {} has unknown category '{}'", row.id, row.category))?;
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category,
            location: GeoPoint::new(row.lat, row.lng),
            address: row.address,
            city: row.city,
            event_date: row.event_date,
            duration_minutes: row.duration_minutes,
            rarity: row.rarity,
            active: row.active,
        })
    }
}

/// DTO for creating a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: GeoPoint,
    pub address: String,
    pub event_date: Timestamp,
    pub duration_minutes: i32,
    pub rarity: String,
    pub source: EventSource,
    pub source_url: Option<String>,
}
