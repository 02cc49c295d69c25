//! Task discovery: which of today's tasks a user can see from where they
//! stand.

use serde::Serialize;

use crate::error::CoreError;
use crate::events::Event;
use crate::geo::{validate_coordinates, GeoPoint};
use crate::preferences::is_category_preferred;
use crate::store::TaskStore;
use crate::tasks::DailyTask;
use crate::types::DbId;

/// Events farther than this from the query point are not "nearby".
pub const NEARBY_RADIUS_METERS: f64 = 5000.0;

#[derive(Debug, Clone, Copy)]
pub struct DiscoveryQuery {
    pub user_id: DbId,
    pub lat: f64,
    pub lng: f64,
    /// Skip preference filtering even when the user has preferences.
    pub show_all: bool,
}

/// Which filter produced the event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Personalized,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub active_filters: FilterMode,
    pub show_all: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    pub tasks: Vec<DailyTask>,
    pub events: Vec<Event>,
    /// Nearby events left after preference filtering.
    pub filtered_count: usize,
    /// All nearby events.
    pub total_count: usize,
    pub user_score: i64,
    pub user_preferences: FilterSummary,
}

/// Keep the events within [`NEARBY_RADIUS_METERS`] of `origin`.
pub fn nearby_events(events: Vec<Event>, origin: &GeoPoint) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| origin.distance_to(&event.location) <= NEARBY_RADIUS_METERS)
        .collect()
}

/// List nearby events and their active tasks for a user.
///
/// Read-only. Preference filtering applies only when `show_all` is false and
/// the user has a linked preference document that still exists.
pub async fn discover<S: TaskStore>(
    store: &S,
    query: &DiscoveryQuery,
) -> Result<DiscoveryResult, CoreError> {
    let origin = validate_coordinates(query.lat, query.lng)?;

    let user = store
        .find_user_by_id(query.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: query.user_id,
        })?;

    let nearby = nearby_events(store.find_active_events().await?, &origin);
    let total_count = nearby.len();

    let preferences = match (query.show_all, user.preferences_id) {
        (false, Some(_)) => store.find_preferences_by_user(user.id).await?,
        _ => None,
    };

    let (events, active_filters) = match preferences {
        Some(prefs) => (
            nearby
                .into_iter()
                .filter(|event| is_category_preferred(&prefs, event))
                .collect::<Vec<_>>(),
            FilterMode::Personalized,
        ),
        None => (nearby, FilterMode::All),
    };

    let event_ids: Vec<DbId> = events.iter().map(|e| e.id).collect();
    let tasks = if event_ids.is_empty() {
        Vec::new()
    } else {
        store.find_active_tasks_for_events(&event_ids).await?
    };

    Ok(DiscoveryResult {
        tasks,
        filtered_count: events.len(),
        events,
        total_count,
        user_score: user.total_score,
        user_preferences: FilterSummary {
            active_filters,
            show_all: query.show_all,
        },
    })
}
