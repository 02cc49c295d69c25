//! In-memory [`TaskStore`] and fixtures for unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use crate::events::{Event, EventCategory};
use crate::geo::{GeoPoint, EARTH_RADIUS_METERS};
use crate::preferences::{
    EventPreferences, GroupOrSolo, PreferredTime, Preferences, Profile, TravelPreferences,
    TravelStyle,
};
use crate::store::{ClaimCommit, CommitOutcome, StoreError, StoreResult, TaskStore};
use crate::tasks::{CompletedTaskEntry, DailyTask, NewTaskClaim};
use crate::types::DbId;
use crate::users::{CurrentLocation, User, DEFAULT_CITY};

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<DbId, User>,
    events: BTreeMap<DbId, Event>,
    preferences: BTreeMap<DbId, Preferences>,
    tasks: BTreeMap<DbId, DailyTask>,
    claims: Vec<NewTaskClaim>,
    completed_log: Vec<(DbId, CompletedTaskEntry)>,
    unavailable: bool,
}

/// A store whose `commit_claim` runs under one mutex, which makes it
/// trivially atomic.
#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub(crate) fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.insert(user.id, user);
    }

    pub(crate) fn add_event(&self, event: Event) {
        self.state.lock().unwrap().events.insert(event.id, event);
    }

    pub(crate) fn add_task(&self, task: DailyTask) {
        self.state.lock().unwrap().tasks.insert(task.id, task);
    }

    /// Store a preference document and link it from its user.
    pub(crate) fn link_preferences(&self, prefs: Preferences) {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.get_mut(&prefs.user_id) {
            user.preferences_id = Some(prefs.id);
        }
        state.preferences.insert(prefs.user_id, prefs);
    }

    /// Make every write fail with a transient error.
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    pub(crate) fn user(&self, id: DbId) -> User {
        self.state.lock().unwrap().users[&id].clone()
    }

    pub(crate) fn task(&self, id: DbId) -> DailyTask {
        self.state.lock().unwrap().tasks[&id].clone()
    }

    pub(crate) fn claims(&self) -> Vec<NewTaskClaim> {
        self.state.lock().unwrap().claims.clone()
    }

    pub(crate) fn completed_log(&self, user_id: DbId) -> Vec<CompletedTaskEntry> {
        self.state
            .lock()
            .unwrap()
            .completed_log
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl TaskStore for MemoryStore {
    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_active_events(&self) -> StoreResult<Vec<Event>> {
        let state = self.state.lock().unwrap();
        Ok(state.events.values().filter(|e| e.active).cloned().collect())
    }

    async fn find_preferences_by_user(&self, user_id: DbId) -> StoreResult<Option<Preferences>> {
        Ok(self.state.lock().unwrap().preferences.get(&user_id).cloned())
    }

    async fn find_active_tasks_for_events(&self, event_ids: &[DbId]) -> StoreResult<Vec<DailyTask>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .values()
            .filter(|t| t.active && event_ids.contains(&t.event_id))
            .cloned()
            .collect())
    }

    async fn find_task_by_id(&self, id: DbId) -> StoreResult<Option<DailyTask>> {
        let task = self.state.lock().unwrap().tasks.get(&id).cloned();
        // Give concurrent claimants a chance to read the same snapshot.
        tokio::task::yield_now().await;
        Ok(task)
    }

    async fn find_event_by_id(&self, id: DbId) -> StoreResult<Option<Event>> {
        Ok(self.state.lock().unwrap().events.get(&id).cloned())
    }

    async fn insert_claim_audit(&self, record: &NewTaskClaim) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(StoreError::Transient("store offline".to_string()));
        }
        state.claims.push(record.clone());
        Ok(())
    }

    async fn commit_claim(&self, commit: &ClaimCommit) -> StoreResult<CommitOutcome> {
        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(StoreError::Transient("store offline".to_string()));
        }

        let task = state
            .tasks
            .get_mut(&commit.task_id)
            .ok_or_else(|| StoreError::Failure(format!("task {} vanished", commit.task_id)))?;
        if task.is_completed_by(commit.user_id) {
            return Ok(CommitOutcome::AlreadyCompleted);
        }

        let is_first = task.completed_by.is_empty();
        let points = commit.award.points(is_first);
        task.completed_by.push(commit.completion(points));
        if is_first {
            task.first_completer = Some(commit.user_id);
        }

        let user = state
            .users
            .get_mut(&commit.user_id)
            .ok_or_else(|| StoreError::Failure(format!("user {} vanished", commit.user_id)))?;
        user.total_score += i64::from(points);
        let new_total_score = user.total_score;

        state
            .completed_log
            .push((commit.user_id, commit.log_entry(is_first, points)));
        state.claims.push(commit.audit_record(is_first, points));

        Ok(CommitOutcome::Applied {
            is_first,
            points_awarded: points,
            new_total_score,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A point `meters` due north of `origin`.
pub(crate) fn offset_north(origin: &GeoPoint, meters: f64) -> GeoPoint {
    GeoPoint::new(origin.lat + (meters / EARTH_RADIUS_METERS).to_degrees(), origin.lng)
}

pub(crate) fn user(id: DbId) -> User {
    User {
        id,
        username: format!("player{id}"),
        current_location: CurrentLocation {
            lat: 0.0,
            lng: 0.0,
            updated_at: Utc::now(),
        },
        city: DEFAULT_CITY.to_string(),
        preferences_id: None,
        total_score: 0,
    }
}

pub(crate) fn event(id: DbId, category: EventCategory, location: GeoPoint) -> Event {
    Event {
        id,
        title: format!("{category} night"),
        description: String::new(),
        category,
        location,
        address: "Piazza Duomo".to_string(),
        city: DEFAULT_CITY.to_string(),
        event_date: Utc::now(),
        duration_minutes: 120,
        rarity: "common".to_string(),
        active: true,
    }
}

pub(crate) fn task(id: DbId, event_id: DbId, base_points: i32) -> DailyTask {
    DailyTask {
        id,
        event_id,
        task_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        title: format!("Task {id}"),
        description: String::new(),
        ai_generated: false,
        base_points,
        completed_by: Vec::new(),
        first_completer: None,
        active: true,
        created_at: Utc::now(),
    }
}

pub(crate) fn event_preferences(
    categories: &[(EventCategory, i32)],
    favorites: &[EventCategory],
) -> EventPreferences {
    EventPreferences {
        categories: categories.iter().copied().collect(),
        top_3_favorites: favorites.to_vec(),
        preferred_time: PreferredTime::default(),
        group_or_solo: GroupOrSolo::default(),
    }
}

pub(crate) fn preferences(
    user_id: DbId,
    categories: &[(EventCategory, i32)],
    favorites: &[EventCategory],
) -> Preferences {
    Preferences {
        id: user_id * 10,
        user_id,
        profile: Profile {
            age: 30,
            bio: String::new(),
            favorite_activities: vec![],
            music_genres: vec![],
            dietary_restrictions: vec![],
            travel_style: TravelStyle::default(),
            average_daily_budget: 50.0,
        },
        travel_preferences: TravelPreferences::default(),
        event_preferences: event_preferences(categories, favorites),
        share_profile: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
