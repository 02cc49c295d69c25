//! User entity model and DTOs.

use explora_core::types::{DbId, Timestamp};
use explora_core::users::{self, CurrentLocation};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub location_lat: f64,
    pub location_lng: f64,
    pub location_updated_at: Timestamp,
    pub city: String,
    pub preferences_id: Option<DbId>,
    pub preferences_completed: bool,
    pub total_score: i64,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn current_location(&self) -> CurrentLocation {
        CurrentLocation {
            lat: self.location_lat,
            lng: self.location_lng,
            updated_at: self.location_updated_at,
        }
    }
}

impl From<User> for users::User {
    fn from(row: User) -> Self {
        Self {
            id: row.id,
            current_location: row.current_location(),
            username: row.username,
            city: row.city,
            preferences_id: row.preferences_id,
            total_score: row.total_score,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub current_location: CurrentLocation,
    pub city: String,
    pub preferences_id: Option<DbId>,
    pub preferences_completed: bool,
    pub total_score: i64,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(row: User) -> Self {
        Self {
            id: row.id,
            current_location: row.current_location(),
            email: row.email,
            username: row.username,
            city: row.city,
            preferences_id: row.preferences_id,
            preferences_completed: row.preferences_completed,
            total_score: row.total_score,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
        }
    }
}

/// DTO for creating a new user. `email` must already be normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Row from `user_completed_tasks`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletedTask {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: DbId,
    pub completed_at: Timestamp,
    pub points_earned: i32,
    pub was_first: bool,
}
