use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every check passes, otherwise `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Per-level file sinks and whether their directories still exist.
    pub log_sinks: Vec<LogSinkHealth>,
}

#[derive(Serialize)]
pub struct LogSinkHealth {
    pub level: String,
    pub directory: String,
    pub present: bool,
}

/// GET /health -- database reachability plus the state of each log directory.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = account_db::health_check(&state.pool).await.is_ok();

    let mut log_sinks = Vec::with_capacity(state.log_sinks.len());
    for sink in state.log_sinks.iter() {
        let present = tokio::fs::metadata(&sink.directory)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        log_sinks.push(LogSinkHealth {
            level: sink.level.to_string(),
            directory: sink.directory.display().to_string(),
            present,
        });
    }

    let healthy = db_healthy && log_sinks.iter().all(|s| s.present);

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        log_sinks,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
