//! Repository for the `users` and `user_completed_tasks` tables.

use explora_core::tasks::CompletedTaskEntry;
use explora_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CompletedTask, CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, password_hash, location_lat, location_lng, \
                       location_updated_at, city, preferences_id, preferences_completed, \
                       total_score, last_login_at, created_at, updated_at";

const COMPLETED_COLUMNS: &str = "id, user_id, task_id, completed_at, points_earned, was_first";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with score 0 and the default city.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, username, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Callers pass the lowercased address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Overwrite the user's current location and stamp it with now.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_location(
        pool: &PgPool,
        id: DbId,
        lat: f64,
        lng: f64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                location_lat = $2,
                location_lng = $3,
                location_updated_at = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(lat)
            .bind(lng)
            .fetch_optional(pool)
            .await
    }

    /// Point the user at their preference document and mark setup complete.
    pub async fn link_preferences(
        conn: &mut PgConnection,
        user_id: DbId,
        preferences_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                preferences_id = $2,
                preferences_completed = true,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(preferences_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `points` to the user's total score, returning the new total.
    pub async fn increment_score(
        conn: &mut PgConnection,
        user_id: DbId,
        points: i32,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET total_score = total_score + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING total_score",
        )
        .bind(user_id)
        .bind(i64::from(points))
        .fetch_optional(conn)
        .await
    }

    pub async fn append_completed_task(
        conn: &mut PgConnection,
        user_id: DbId,
        entry: &CompletedTaskEntry,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_completed_tasks
                (user_id, task_id, completed_at, points_earned, was_first)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(entry.task_id)
        .bind(entry.completed_at)
        .bind(entry.points_earned)
        .bind(entry.was_first)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// The user's completed-task log, oldest first.
    pub async fn list_completed_tasks(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CompletedTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETED_COLUMNS} FROM user_completed_tasks
             WHERE user_id = $1
             ORDER BY completed_at, id"
        );
        sqlx::query_as::<_, CompletedTask>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
