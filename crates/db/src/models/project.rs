//! Project entity model and DTOs.

use account_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The id is always assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProject {
    pub name: String,
}

impl CreateProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
