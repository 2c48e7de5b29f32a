use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `key` is a human-readable lookup key such as `id 42` or `name 'Alpha'`.
    #[error("Entity not found: {entity} with {key}")]
    NotFound { entity: &'static str, key: String },
}

impl CoreError {
    /// Not-found error for a lookup by primary key.
    pub fn not_found_id(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }

    /// Not-found error for a lookup by unique name.
    pub fn not_found_name(entity: &'static str, name: &str) -> Self {
        Self::NotFound {
            entity,
            key: format!("name '{name}'"),
        }
    }
}
