//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /                  -> create
/// GET    /by-name/{name}    -> get_by_name
/// GET    /{id}              -> get_by_id
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(project::create))
        .route("/by-name/{name}", get(project::get_by_name))
        .route("/{id}", get(project::get_by_id).delete(project::delete))
}
