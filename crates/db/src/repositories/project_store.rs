//! Persistence capability for projects and its PostgreSQL implementation.

use account_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// The operations [`ProjectRepository`](super::ProjectRepository) needs from
/// a storage backend.
///
/// Implementations own uniqueness and length enforcement on `name` and the
/// assignment of `id`; they report violations as
/// [`StoreError::ConstraintViolation`].
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a new project and return the stored row, including its generated id.
    async fn insert(&self, input: &CreateProject) -> Result<Project, StoreError>;

    /// Find the project whose name matches `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Project>, StoreError>;

    /// Find a project by its id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError>;

    /// Permanently delete a project. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// [`ProjectStore`] backed by the `projects` table.
#[derive(Debug, Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn insert(&self, input: &CreateProject) -> Result<Project, StoreError> {
        let query = format!(
            "INSERT INTO projects (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(project)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
