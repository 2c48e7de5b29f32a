use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use account_api::config::ServerConfig;
use account_api::router::build_app_router;
use account_api::state::AppState;
use account_telemetry::{
    init_tracing, rotation_configs, ArchiveSweeper, LoggingSettings, SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let logging = LoggingSettings::from_env().context("Invalid logging configuration")?;
    let log_guards = init_tracing(&logging).context("Failed to initialize logging")?;

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = account_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    account_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database connection established");

    account_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Log archive sweeper ---
    let log_configs = rotation_configs(&logging);
    let sweeper = ArchiveSweeper::new(log_configs.clone(), Arc::new(SystemClock)).spawn();

    let addr = format!("{}:{}", config.host, config.port);
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let app = build_app_router(AppState::new(pool.clone(), config, log_configs))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper.shutdown(shutdown_timeout).await;

    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    // Flush file sinks last.
    drop(log_guards);
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
