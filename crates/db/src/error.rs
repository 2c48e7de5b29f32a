//! Persistence error type.

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `check_violation`.
const PG_CHECK_VIOLATION: &str = "23514";

/// PostgreSQL SQLSTATE for `string_data_right_truncation` (value too long for `VARCHAR(n)`).
const PG_STRING_TOO_LONG: &str = "22001";

/// Errors surfaced by [`ProjectStore`](crate::repositories::ProjectStore)
/// implementations and the repository facade.
///
/// Constraint failures are separated from every other database failure so
/// callers can tell "your input collides with existing data" apart from
/// "the database is unhappy".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness, check, or length constraint rejected the write.
    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn constraint(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// `true` for [`StoreError::ConstraintViolation`].
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            match code.as_deref() {
                Some(PG_UNIQUE_VIOLATION) | Some(PG_CHECK_VIOLATION) => {
                    return Self::ConstraintViolation {
                        constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                        message: db_err.message().to_string(),
                    };
                }
                Some(PG_STRING_TOO_LONG) => {
                    return Self::ConstraintViolation {
                        constraint: "value_too_long".to_string(),
                        message: db_err.message().to_string(),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}
