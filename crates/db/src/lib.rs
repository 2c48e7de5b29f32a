//! Database access for the account backend.
//!
//! - [`models`]: row structs and input DTOs
//! - [`repositories`]: the [`ProjectStore`](repositories::ProjectStore)
//!   capability, its PostgreSQL implementation, and the
//!   [`ProjectRepository`](repositories::ProjectRepository) facade

pub mod error;
pub mod models;
pub mod repositories;

pub use error::StoreError;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
