//! Repository for the `daily_tasks` and `task_completions` tables.

use explora_core::scoring::ClaimAward;
use explora_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::daily_task::{AppendedCompletion, CreateDailyTask, DailyTask, TaskCompletion};

const COLUMNS: &str = "id, event_id, task_date, title, description, ai_generated, \
                       base_points, first_completer, active, created_at";

const COMPLETION_COLUMNS: &str = "task_id, user_id, completed_at, points_awarded";

pub struct DailyTaskRepo;

impl DailyTaskRepo {
    pub async fn create(pool: &PgPool, input: &CreateDailyTask) -> Result<DailyTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_tasks
                (event_id, task_date, title, description, ai_generated, base_points)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(input.event_id)
            .bind(input.task_date)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.ai_generated)
            .bind(input.base_points)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DailyTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_tasks WHERE id = $1");
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_active_for_events(
        pool: &PgPool,
        event_ids: &[DbId],
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_tasks
             WHERE active AND event_id = ANY($1)
             ORDER BY id"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(event_ids)
            .fetch_all(pool)
            .await
    }

    /// Completion rows for the given tasks, in completion order.
    pub async fn list_completions(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<TaskCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETION_COLUMNS} FROM task_completions
             WHERE task_id = ANY($1)
             ORDER BY completed_at, id"
        );
        sqlx::query_as::<_, TaskCompletion>(&query)
            .bind(task_ids)
            .fetch_all(pool)
            .await
    }

    /// Append `user_id` to the task's completion ledger unless already present.
    ///
    /// Locks the task row, so concurrent callers for the same task run one at
    /// a time and exactly one of them observes an empty ledger. Returns
    /// `None` if the user already has an entry. Must run inside a
    /// transaction.
    pub async fn append_completion_if_absent(
        conn: &mut PgConnection,
        task_id: DbId,
        user_id: DbId,
        completed_at: Timestamp,
        award: &ClaimAward,
    ) -> Result<Option<AppendedCompletion>, sqlx::Error> {
        sqlx::query("SELECT id FROM daily_tasks WHERE id = $1 FOR UPDATE")
            .bind(task_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let (already_completed, completions): (bool, i64) = sqlx::query_as(
            "SELECT COALESCE(BOOL_OR(user_id = $2), false), COUNT(*)
             FROM task_completions WHERE task_id = $1",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        if already_completed {
            return Ok(None);
        }

        let is_first = completions == 0;
        let points_awarded = award.points(is_first);

        let inserted = sqlx::query(
            "INSERT INTO task_completions (task_id, user_id, completed_at, points_awarded)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_task_completions_task_user DO NOTHING",
        )
        .bind(task_id)
        .bind(user_id)
        .bind(completed_at)
        .bind(points_awarded)
        .execute(&mut *conn)
        .await?;

        if inserted.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(AppendedCompletion {
            is_first,
            points_awarded,
        }))
    }

    /// Record the first completer. A no-op if one is already set.
    pub async fn set_first_completer(
        conn: &mut PgConnection,
        task_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE daily_tasks SET first_completer = $2
             WHERE id = $1 AND first_completer IS NULL",
        )
        .bind(task_id)
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE daily_tasks SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
