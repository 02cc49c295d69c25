//! Repository for the `events` table.

use explora_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event};

const COLUMNS: &str = "id, title, description, category, lat, lng, address, city, \
                       event_date, duration_minutes, rarity, source, source_url, active, \
                       created_at";

pub struct EventRepo;

impl EventRepo {
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (title, description, category, lat, lng, address, event_date,
                 duration_minutes, rarity, source, source_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(input.location.lat)
            .bind(input.location.lng)
            .bind(&input.address)
            .bind(input.event_date)
            .bind(input.duration_minutes)
            .bind(&input.rarity)
            .bind(input.source.as_str())
            .bind(&input.source_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE active ORDER BY id");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE events SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
