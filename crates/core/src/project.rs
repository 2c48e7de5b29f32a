//! Project naming rules.
//!
//! The database enforces the same limits through `uq_projects_name`,
//! `ck_projects_name_length` and `ck_projects_name_chars`; checking them here
//! lets callers reject bad input before a round-trip.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity label used in error messages.
pub const PROJECT_ENTITY: &str = "Project";

/// Maximum project name length, in characters.
pub const MAX_PROJECT_NAME_LEN: usize = 20;

/// Name of the unique constraint on `projects.name`.
pub const NAME_UNIQUE_CONSTRAINT: &str = "uq_projects_name";

/// Name of the length check constraint on `projects.name`.
pub const NAME_LENGTH_CONSTRAINT: &str = "ck_projects_name_length";

/// Name of the check constraint forbidding control characters in `projects.name`.
pub const NAME_CHARS_CONSTRAINT: &str = "ck_projects_name_chars";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A project name that no row could ever hold, tagged with the table
/// constraint it would trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NameViolation {
    pub constraint: &'static str,
    pub message: String,
}

impl NameViolation {
    fn new(constraint: &'static str, message: impl Into<String>) -> Self {
        Self {
            constraint,
            message: message.into(),
        }
    }
}

/// Validate a project name: non-blank, at most [`MAX_PROJECT_NAME_LEN`]
/// characters and free of control characters (including NUL, which
/// PostgreSQL text cannot store). Length is counted in `char`s, not bytes.
pub fn validate_project_name(name: &str) -> Result<(), NameViolation> {
    if name.trim().is_empty() {
        return Err(NameViolation::new(
            NAME_LENGTH_CONSTRAINT,
            "Project name must not be empty",
        ));
    }

    let len = name.chars().count();
    if len > MAX_PROJECT_NAME_LEN {
        return Err(NameViolation::new(
            NAME_LENGTH_CONSTRAINT,
            format!("Project name must be at most {MAX_PROJECT_NAME_LEN} characters, got {len}"),
        ));
    }

    if let Some(c) = name.chars().find(|c| c.is_control()) {
        return Err(NameViolation::new(
            NAME_CHARS_CONSTRAINT,
            format!("Project name must not contain control character {c:?}"),
        ));
    }

    Ok(())
}
