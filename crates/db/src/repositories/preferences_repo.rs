//! Repository for the `user_preferences` table.

use explora_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::preferences::{CreatePreferences, UpdatePreferences, UserPreferences};

const COLUMNS: &str = "id, user_id, profile, travel_preferences, event_preferences, \
                       share_profile, created_at, updated_at";

pub struct PreferencesRepo;

impl PreferencesRepo {
    /// Insert the user's preference document.
    ///
    /// Fails with a unique violation on `uq_user_preferences_user` if the
    /// user already has one.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreatePreferences,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences
                (user_id, profile, travel_preferences, event_preferences, share_profile)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(input.user_id)
            .bind(Json(&input.profile))
            .bind(Json(&input.travel_preferences))
            .bind(Json(&input.event_preferences))
            .bind(input.share_profile)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the provided sections wholesale.
    ///
    /// Returns `None` if the user has no preference document.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdatePreferences,
    ) -> Result<Option<UserPreferences>, sqlx::Error> {
        let query = format!(
            "UPDATE user_preferences SET
                profile = COALESCE($2, profile),
                travel_preferences = COALESCE($3, travel_preferences),
                event_preferences = COALESCE($4, event_preferences),
                share_profile = COALESCE($5, share_profile),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .bind(input.profile.as_ref().map(Json))
            .bind(input.travel_preferences.as_ref().map(Json))
            .bind(input.event_preferences.as_ref().map(Json))
            .bind(input.share_profile)
            .fetch_optional(pool)
            .await
    }
}
