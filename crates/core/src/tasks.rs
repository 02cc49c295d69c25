//! Daily tasks, their completion ledger, and claim audit records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::geo::GeoPoint;
use crate::types::{DbId, Timestamp};

/// One user's completion of a daily task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCompletion {
    pub user_id: DbId,
    pub completed_at: Timestamp,
    pub points_awarded: i32,
}

/// A task bound to one event for one day.
///
/// `completed_by` never lists the same user twice; `first_completer` is set
/// once, by the claim that appended the first entry.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTask {
    pub id: DbId,
    pub event_id: DbId,
    pub task_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub ai_generated: bool,
    pub base_points: i32,
    pub completed_by: Vec<TaskCompletion>,
    pub first_completer: Option<DbId>,
    pub active: bool,
    pub created_at: Timestamp,
}

impl DailyTask {
    pub fn is_completed_by(&self, user_id: DbId) -> bool {
        self.completed_by.iter().any(|c| c.user_id == user_id)
    }
}

/// Outcome recorded in a claim audit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Success,
    FailedDistance,
    AlreadyCompleted,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::FailedDistance => "failed_distance",
            Self::AlreadyCompleted => "already_completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "failed_distance" => Some(Self::FailedDistance),
            "already_completed" => Some(Self::AlreadyCompleted),
            _ => None,
        }
    }
}

/// An immutable audit record of one claim attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskClaim {
    pub user_id: DbId,
    pub task_id: DbId,
    pub event_id: DbId,
    pub user_location: GeoPoint,
    pub event_location: GeoPoint,
    pub distance_meters: f64,
    pub status: ClaimStatus,
    pub points_awarded: i32,
    pub was_first: bool,
    pub bonus_applied: bool,
    pub claimed_at: Timestamp,
}

/// Entry appended to a user's completed-task log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedTaskEntry {
    pub task_id: DbId,
    pub completed_at: Timestamp,
    pub points_earned: i32,
    pub was_first: bool,
}
