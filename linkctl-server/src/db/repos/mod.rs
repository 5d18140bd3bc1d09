//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Treats UNIQUE / FOREIGN KEY constraints as the authoritative guard and
//!   maps their violations to domain errors
//! - Uses transactions for multi-step operations

pub mod tags;
pub mod links;

pub use tags::TagRepo;
pub use links::LinkRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("tag name '{name}' already exists")]
    DuplicateName { name: String },

    #[error("link '{link_id}' references an unknown tag")]
    UnknownTag { link_id: String },

    #[error("inconsistent store state: {0}")]
    Inconsistent(String),
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.is_foreign_key_violation())
}
