//! Claim audit row model.

use explora_core::tasks::ClaimStatus;
use explora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the append-only `task_claims` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskClaim {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: DbId,
    pub event_id: DbId,
    pub user_lat: f64,
    pub user_lng: f64,
    pub event_lat: f64,
    pub event_lng: f64,
    pub distance_meters: f64,
    pub status: String,
    pub points_awarded: i32,
    pub was_first: bool,
    pub bonus_applied: bool,
    pub claimed_at: Timestamp,
}

impl TaskClaim {
    /// `None` for a status string outside the `task_claims` check constraint.
    pub fn claim_status(&self) -> Option<ClaimStatus> {
        ClaimStatus::parse(&self.status)
    }
}
