use account_core::error::CoreError;
use account_db::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// errors. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `account_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the project repository.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, key }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with {key} not found"),
            ),

            AppError::Store(StoreError::ConstraintViolation {
                constraint,
                message,
            }) => (
                StatusCode::CONFLICT,
                "CONSTRAINT_VIOLATION",
                format!("Constraint {constraint} violated: {message}"),
            ),

            // Never leak driver messages to clients.
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
