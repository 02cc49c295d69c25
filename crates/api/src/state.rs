use std::sync::Arc;

use explora_db::PgTaskStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: explora_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Store handle for the discovery and claim engine.
    pub fn task_store(&self) -> PgTaskStore {
        PgTaskStore::new(self.pool.clone())
    }
}
