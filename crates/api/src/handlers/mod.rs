pub mod auth;
pub mod location;
pub mod preferences;
pub mod tasks;
