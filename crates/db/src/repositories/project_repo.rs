//! Repository facade for projects.

use account_core::project::validate_project_name;
use account_core::types::DbId;

use crate::error::StoreError;
use crate::models::project::{CreateProject, Project};
use crate::repositories::project_store::{PgProjectStore, ProjectStore};

/// Create / lookup / delete operations for projects over an injected
/// [`ProjectStore`].
///
/// The store is the sole arbiter of name uniqueness: concurrent creates with
/// the same name race at the store and all but one fail with
/// [`StoreError::ConstraintViolation`].
pub struct ProjectRepository<S = PgProjectStore> {
    store: S,
}

impl<S: ProjectStore> ProjectRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert a new project, returning the created row with its assigned id.
    ///
    /// Names the table could never hold (blank, too long, control
    /// characters) are rejected as a violation of the matching constraint
    /// without reaching the store.
    pub async fn create(&self, input: &CreateProject) -> Result<Project, StoreError> {
        if let Err(violation) = validate_project_name(&input.name) {
            tracing::debug!(name = ?input.name, error = %violation, "Rejected project name");
            return Err(StoreError::constraint(violation.constraint, violation.message));
        }

        match self.store.insert(input).await {
            Ok(project) => {
                tracing::info!(project_id = project.id, name = %project.name, "Project created");
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(name = %input.name, error = %e, "Project create failed");
                Err(e)
            }
        }
    }

    /// Find a project by exact name. `Ok(None)` means no such project.
    ///
    /// A name that fails [`validate_project_name`] cannot be stored, so it
    /// short-circuits to `Ok(None)`.
    pub async fn find_one_by_name(&self, name: &str) -> Result<Option<Project>, StoreError> {
        if validate_project_name(name).is_err() {
            return Ok(None);
        }
        self.store.find_by_name(name).await
    }

    /// Find a project by id. `Ok(None)` means no such project.
    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Permanently delete a project. Returns `true` if a row was removed.
    pub async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!(project_id = id, "Project deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use account_core::project::{
        NAME_CHARS_CONSTRAINT, NAME_LENGTH_CONSTRAINT, NAME_UNIQUE_CONSTRAINT,
    };
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// In-memory store that enforces name uniqueness under a single lock,
    /// the way a database unique index would.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<Project>>,
        inserts: Mutex<usize>,
    }

    impl MemoryStore {
        fn insert_calls(&self) -> usize {
            *self.inserts.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProjectStore for MemoryStore {
        async fn insert(&self, input: &CreateProject) -> Result<Project, StoreError> {
            *self.inserts.lock().unwrap() += 1;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|p| p.name == input.name) {
                return Err(StoreError::constraint(
                    NAME_UNIQUE_CONSTRAINT,
                    format!("duplicate name '{}'", input.name),
                ));
            }
            let now = Utc::now();
            let project = Project {
                id: rows.iter().map(|p| p.id).max().unwrap_or(0) + 1,
                name: input.name.clone(),
                created_at: now,
                updated_at: now,
            };
            rows.push(project.clone());
            Ok(project)
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Project>, StoreError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|p| p.name == name).cloned())
        }

        async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|p| p.id == id).cloned())
        }

        async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| p.id != id);
            Ok(rows.len() < before)
        }
    }

    fn repo() -> ProjectRepository<MemoryStore> {
        ProjectRepository::new(MemoryStore::default())
    }

    #[tokio::test]
    async fn create_then_find_returns_same_project() {
        let repo = repo();
        let created = repo.create(&CreateProject::new("Project-12345")).await.unwrap();

        let found = repo
            .find_one_by_name("Project-12345")
            .await
            .unwrap()
            .expect("project should exist");

        assert_eq!(found.id, created.id);
        assert_eq!(found.name, created.name);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_constraint_violation() {
        let repo = repo();
        repo.create(&CreateProject::new("Alpha")).await.unwrap();

        let err = repo.create(&CreateProject::new("Alpha")).await.unwrap_err();
        assert_matches!(
            err,
            StoreError::ConstraintViolation { ref constraint, .. } if constraint == NAME_UNIQUE_CONSTRAINT
        );
    }

    #[tokio::test]
    async fn concurrent_duplicate_creates_have_exactly_one_winner() {
        let repo = Arc::new(repo());
        let input = CreateProject::new("Racer");

        let (a, b) = tokio::join!(
            {
                let repo = Arc::clone(&repo);
                let input = input.clone();
                tokio::spawn(async move { repo.create(&input).await })
            },
            {
                let repo = Arc::clone(&repo);
                let input = input.clone();
                tokio::spawn(async move { repo.create(&input).await })
            }
        );
        let results = [a.unwrap(), b.unwrap()];

        let ok = results.iter().filter(|r| r.is_ok()).count();
        let violations = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.is_constraint_violation()))
            .count();
        assert_eq!(ok, 1);
        assert_eq!(violations, 1);
    }

    #[tokio::test]
    async fn invalid_names_never_reach_the_store() {
        let repo = repo();

        for name in ["", "   ", "this-name-is-way-too-long"] {
            let err = repo.create(&CreateProject::new(name)).await.unwrap_err();
            assert_matches!(
                err,
                StoreError::ConstraintViolation { ref constraint, .. } if constraint == NAME_LENGTH_CONSTRAINT
            );
        }
        assert_eq!(repo.store().insert_calls(), 0);
    }

    #[tokio::test]
    async fn control_characters_are_a_chars_violation() {
        let repo = repo();

        let err = repo.create(&CreateProject::new("a\0b")).await.unwrap_err();
        assert_matches!(
            err,
            StoreError::ConstraintViolation { ref constraint, .. } if constraint == NAME_CHARS_CONSTRAINT
        );
        assert_eq!(repo.store().insert_calls(), 0);
    }

    #[tokio::test]
    async fn unstorable_names_look_up_as_none() {
        let repo = repo();
        for name in ["a\0b", "   ", "this-name-is-way-too-long"] {
            assert!(repo.find_one_by_name(name).await.unwrap().is_none(), "{name:?}");
        }
    }

    #[tokio::test]
    async fn unknown_name_is_none() {
        let repo = repo();
        assert!(repo.find_one_by_name("Nobody").await.unwrap().is_none());
        assert!(repo.find_one_by_name("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_project() {
        let repo = repo();
        let created = repo.create(&CreateProject::new("Short-lived")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_one_by_name("Short-lived").await.unwrap().is_none());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
