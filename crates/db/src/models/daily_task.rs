//! Daily task and completion ledger models.

use chrono::NaiveDate;
use explora_core::tasks::{self, TaskCompletion as CompletionEntry};
use explora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `daily_tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTask {
    pub id: DbId,
    pub event_id: DbId,
    pub task_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub ai_generated: bool,
    pub base_points: i32,
    pub first_completer: Option<DbId>,
    pub active: bool,
    pub created_at: Timestamp,
}

impl DailyTask {
    /// Attach the task's completion rows, which live in their own table.
    pub fn into_domain(self, completed_by: Vec<CompletionEntry>) -> tasks::DailyTask {
        tasks::DailyTask {
            id: self.id,
            event_id: self.event_id,
            task_date: self.task_date,
            title: self.title,
            description: self.description,
            ai_generated: self.ai_generated,
            base_points: self.base_points,
            completed_by,
            first_completer: self.first_completer,
            active: self.active,
            created_at: self.created_at,
        }
    }
}

/// Row from `task_completions`.
#[derive(Debug, Clone, FromRow)]
pub struct TaskCompletion {
    pub task_id: DbId,
    pub user_id: DbId,
    pub completed_at: Timestamp,
    pub points_awarded: i32,
}

impl From<TaskCompletion> for CompletionEntry {
    fn from(row: TaskCompletion) -> Self {
        Self {
            user_id: row.user_id,
            completed_at: row.completed_at,
            points_awarded: row.points_awarded,
        }
    }
}

/// Result of a successful compare-and-append on the completion ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedCompletion {
    pub is_first: bool,
    pub points_awarded: i32,
}

/// DTO for creating a new daily task.
#[derive(Debug, Clone)]
pub struct CreateDailyTask {
    pub event_id: DbId,
    pub task_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub ai_generated: bool,
    pub base_points: i32,
}
