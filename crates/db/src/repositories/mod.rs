//! Repository layer.
//!
//! [`ProjectStore`] is the storage capability; [`PgProjectStore`] implements
//! it over `&PgPool` queries. [`ProjectRepository`] is the facade callers use,
//! constructed with whichever store it should talk to.

pub mod project_repo;
pub mod project_store;

pub use project_repo::ProjectRepository;
pub use project_store::{PgProjectStore, ProjectStore};
