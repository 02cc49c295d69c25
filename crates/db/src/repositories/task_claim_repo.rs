//! Repository for the append-only `task_claims` audit table.

use explora_core::tasks::NewTaskClaim;
use explora_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::task_claim::TaskClaim;

const COLUMNS: &str = "id, user_id, task_id, event_id, user_lat, user_lng, event_lat, \
                       event_lng, distance_meters, status, points_awarded, was_first, \
                       bonus_applied, claimed_at";

pub struct TaskClaimRepo;

impl TaskClaimRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        record: &NewTaskClaim,
    ) -> Result<TaskClaim, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_claims
                (user_id, task_id, event_id, user_lat, user_lng, event_lat, event_lng,
                 distance_meters, status, points_awarded, was_first, bonus_applied, claimed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskClaim>(&query)
            .bind(record.user_id)
            .bind(record.task_id)
            .bind(record.event_id)
            .bind(record.user_location.lat)
            .bind(record.user_location.lng)
            .bind(record.event_location.lat)
            .bind(record.event_location.lng)
            .bind(record.distance_meters)
            .bind(record.status.as_str())
            .bind(record.points_awarded)
            .bind(record.was_first)
            .bind(record.bonus_applied)
            .bind(record.claimed_at)
            .fetch_one(conn)
            .await
    }

    /// Audit rows for one task, oldest first.
    pub async fn list_for_task(pool: &PgPool, task_id: DbId) -> Result<Vec<TaskClaim>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_claims WHERE task_id = $1 ORDER BY id");
        sqlx::query_as::<_, TaskClaim>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// The user's claim history, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<TaskClaim>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_claims WHERE user_id = $1 ORDER BY claimed_at DESC, id DESC"
        );
        sqlx::query_as::<_, TaskClaim>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
