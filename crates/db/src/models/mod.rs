//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A conversion into the matching `explora_core` domain type

pub mod daily_task;
pub mod event;
pub mod preferences;
pub mod task_claim;
pub mod user;
