use std::sync::Arc;

use account_db::repositories::{PgProjectStore, ProjectRepository};
use account_db::DbPool;
use account_telemetry::RotationConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project repository over the same pool.
    pub projects: Arc<ProjectRepository<PgProjectStore>>,
    /// File sinks installed at startup, one per level.
    pub log_sinks: Arc<[RotationConfig]>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, log_sinks: Vec<RotationConfig>) -> Self {
        let projects = ProjectRepository::new(PgProjectStore::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            projects: Arc::new(projects),
            log_sinks: log_sinks.into(),
        }
    }
}
