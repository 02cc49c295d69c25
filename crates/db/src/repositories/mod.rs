//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! caller's transaction take `&mut PgConnection` instead.

pub mod daily_task_repo;
pub mod event_repo;
pub mod preferences_repo;
pub mod task_claim_repo;
pub mod user_repo;

pub use daily_task_repo::DailyTaskRepo;
pub use event_repo::EventRepo;
pub use preferences_repo::PreferencesRepo;
pub use task_claim_repo::TaskClaimRepo;
pub use user_repo::UserRepo;
