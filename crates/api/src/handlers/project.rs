//! Handlers for the `/projects` resource.

use account_core::error::CoreError;
use account_core::project::PROJECT_ENTITY;
use account_core::types::DbId;
use account_db::models::project::{CreateProject, Project};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state
        .projects
        .find_one_by_name(&name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_name(PROJECT_ENTITY, &name)))?;
    Ok(Json(project))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found_id(PROJECT_ENTITY, id)))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = state.projects.delete(id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found_id(PROJECT_ENTITY, id)))
    }
}
