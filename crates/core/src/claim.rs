//! Claim adjudication.
//!
//! Per (user, task) the only transition is `unclaimed -> claimed`. The
//! sequence is: load task, event and user; reject repeat claims; check the
//! geofence; price the claim; hand the writes to
//! [`TaskStore::commit_claim`], which decides first-completion atomically.

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::geo::validate_coordinates;
use crate::preferences::is_favorite_category;
use crate::scoring::ClaimAward;
use crate::store::{ClaimCommit, CommitOutcome, TaskStore};
use crate::tasks::{ClaimStatus, NewTaskClaim};
use crate::types::DbId;

/// Maximum claimant-to-event distance for a claim to succeed (inclusive).
pub const CLAIM_RADIUS_METERS: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
pub struct ClaimRequest {
    pub user_id: DbId,
    pub task_id: DbId,
    pub lat: f64,
    pub lng: f64,
}

/// Expected outcomes of a claim. Repeat claims and out-of-range claims are
/// results, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Success {
        points_awarded: i32,
        user_new_score: i64,
        was_first: bool,
        bonus_applied: bool,
    },
    FailedDistance {
        /// Measured distance, rounded to the nearest meter.
        distance_meters: f64,
    },
    AlreadyCompleted,
}

impl ClaimOutcome {
    pub fn status(&self) -> ClaimStatus {
        match self {
            Self::Success { .. } => ClaimStatus::Success,
            Self::FailedDistance { .. } => ClaimStatus::FailedDistance,
            Self::AlreadyCompleted => ClaimStatus::AlreadyCompleted,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Success {
                points_awarded,
                was_first: true,
                ..
            } => format!("Congratulations! You're first! +{points_awarded} points"),
            Self::Success { points_awarded, .. } => {
                format!("Task completed! +{points_awarded} points")
            }
            Self::FailedDistance { distance_meters } => format!(
                "You are {distance_meters}m away (max {CLAIM_RADIUS_METERS}m allowed)"
            ),
            Self::AlreadyCompleted => "You have already completed this task".to_string(),
        }
    }
}

pub fn within_geofence(distance_meters: f64) -> bool {
    distance_meters <= CLAIM_RADIUS_METERS
}

/// Adjudicate a claim of `request.task_id` by `request.user_id` standing at
/// (`lat`, `lng`).
pub async fn claim<S: TaskStore>(
    store: &S,
    request: &ClaimRequest,
) -> Result<ClaimOutcome, CoreError> {
    let user_location = validate_coordinates(request.lat, request.lng)?;

    let task = store
        .find_task_by_id(request.task_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "DailyTask",
            id: request.task_id,
        })?;

    let event = store.find_event_by_id(task.event_id).await?.ok_or_else(|| {
        CoreError::Internal(format!(
            "Daily task {} references missing event {}",
            task.id, task.event_id
        ))
    })?;

    let user = store
        .find_user_by_id(request.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: request.user_id,
        })?;

    if task.is_completed_by(user.id) {
        return Ok(ClaimOutcome::AlreadyCompleted);
    }

    let distance = user_location.distance_to(&event.location);
    let claimed_at = Utc::now();

    if !within_geofence(distance) {
        store
            .insert_claim_audit(&NewTaskClaim {
                user_id: user.id,
                task_id: task.id,
                event_id: event.id,
                user_location,
                event_location: event.location,
                distance_meters: distance,
                status: ClaimStatus::FailedDistance,
                points_awarded: 0,
                was_first: false,
                bonus_applied: false,
                claimed_at,
            })
            .await?;
        return Ok(ClaimOutcome::FailedDistance {
            distance_meters: distance.round(),
        });
    }

    let bonus_applied = match user.preferences_id {
        Some(_) => store
            .find_preferences_by_user(user.id)
            .await?
            .is_some_and(|prefs| is_favorite_category(&prefs, &event)),
        None => false,
    };

    let commit = ClaimCommit {
        task_id: task.id,
        user_id: user.id,
        event_id: event.id,
        user_location,
        event_location: event.location,
        distance_meters: distance,
        award: ClaimAward::new(task.base_points, event.rarity_multiplier(), bonus_applied)?,
        bonus_applied,
        claimed_at,
    };

    let outcome = match store.commit_claim(&commit).await? {
        CommitOutcome::Applied {
            is_first,
            points_awarded,
            new_total_score,
        } => ClaimOutcome::Success {
            points_awarded,
            user_new_score: new_total_score,
            was_first: is_first,
            bonus_applied,
        },
        // A concurrent claim by the same user won the append.
        CommitOutcome::AlreadyCompleted => ClaimOutcome::AlreadyCompleted,
    };

    Ok(outcome)
}
