//! Persistence contract consumed by discovery and claim adjudication.
//!
//! The engine never touches a database directly. It reads through
//! [`TaskStore`] and writes the whole success path through a single
//! [`TaskStore::commit_claim`] call, which implementations must apply
//! all-or-nothing.

use std::future::Future;

use crate::events::Event;
use crate::geo::GeoPoint;
use crate::preferences::Preferences;
use crate::scoring::ClaimAward;
use crate::tasks::{ClaimStatus, CompletedTaskEntry, DailyTask, NewTaskClaim, TaskCompletion};
use crate::types::{DbId, Timestamp};
use crate::users::User;

/// Failure reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Timeout, dropped connection, or lost serialization race. Retryable.
    #[error("Store temporarily unavailable: {0}")]
    Transient(String),

    /// Anything else, including rows that fail to map onto domain types.
    #[error("Store failure: {0}")]
    Failure(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for crate::error::CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transient(msg) => Self::Unavailable(msg),
            StoreError::Failure(msg) => Self::Internal(msg),
        }
    }
}

/// Everything the store needs to apply a successful claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCommit {
    pub task_id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub user_location: GeoPoint,
    pub event_location: GeoPoint,
    pub distance_meters: f64,
    pub award: ClaimAward,
    pub bonus_applied: bool,
    pub claimed_at: Timestamp,
}

impl ClaimCommit {
    pub fn completion(&self, points_awarded: i32) -> TaskCompletion {
        TaskCompletion {
            user_id: self.user_id,
            completed_at: self.claimed_at,
            points_awarded,
        }
    }

    pub fn log_entry(&self, is_first: bool, points_awarded: i32) -> CompletedTaskEntry {
        CompletedTaskEntry {
            task_id: self.task_id,
            completed_at: self.claimed_at,
            points_earned: points_awarded,
            was_first: is_first,
        }
    }

    pub fn audit_record(&self, is_first: bool, points_awarded: i32) -> NewTaskClaim {
        NewTaskClaim {
            user_id: self.user_id,
            task_id: self.task_id,
            event_id: self.event_id,
            user_location: self.user_location,
            event_location: self.event_location,
            distance_meters: self.distance_meters,
            status: ClaimStatus::Success,
            points_awarded,
            was_first: is_first,
            bonus_applied: self.bonus_applied,
            claimed_at: self.claimed_at,
        }
    }
}

/// Result of [`TaskStore::commit_claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Every write landed.
    Applied {
        is_first: bool,
        points_awarded: i32,
        new_total_score: i64,
    },
    /// The user already had a completion entry; nothing was written.
    AlreadyCompleted,
}

/// Read and write primitives over users, events, preferences, tasks and the
/// claim audit log.
pub trait TaskStore: Send + Sync {
    fn find_user_by_id(
        &self,
        id: DbId,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// All events with `active = true`.
    fn find_active_events(&self) -> impl Future<Output = StoreResult<Vec<Event>>> + Send;

    fn find_preferences_by_user(
        &self,
        user_id: DbId,
    ) -> impl Future<Output = StoreResult<Option<Preferences>>> + Send;

    /// Active tasks whose event is one of `event_ids`, with their completions.
    fn find_active_tasks_for_events(
        &self,
        event_ids: &[DbId],
    ) -> impl Future<Output = StoreResult<Vec<DailyTask>>> + Send;

    fn find_task_by_id(
        &self,
        id: DbId,
    ) -> impl Future<Output = StoreResult<Option<DailyTask>>> + Send;

    fn find_event_by_id(
        &self,
        id: DbId,
    ) -> impl Future<Output = StoreResult<Option<Event>>> + Send;

    /// Append an audit row. No uniqueness constraint; always succeeds unless
    /// the store itself fails.
    fn insert_claim_audit(
        &self,
        record: &NewTaskClaim,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Apply a successful claim atomically:
    ///
    /// 1. Append the user's completion to the task, only if the user has no
    ///    entry yet (compare-and-append). `is_first` is true iff this append
    ///    moved the list from empty to non-empty, and the awarded points are
    ///    `commit.award.points(is_first)`.
    /// 2. If `is_first`, set the task's first completer.
    /// 3. Increment the user's total score.
    /// 4. Append to the user's completed-task log.
    /// 5. Insert a `success` audit record.
    ///
    /// If step 1 finds an existing entry, return
    /// [`CommitOutcome::AlreadyCompleted`] without writing anything. Any
    /// failure after step 1 must leave no partial state.
    fn commit_claim(
        &self,
        commit: &ClaimCommit,
    ) -> impl Future<Output = StoreResult<CommitOutcome>> + Send;
}
