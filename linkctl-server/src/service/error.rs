//! Service-level error taxonomy

use crate::db::DbError;
use crate::models::ValidationError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
///
/// Validation failures are detected before any store access; everything the
/// store reports is classified here so the HTTP layer never inspects
/// `sqlx` errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Store(#[source] DbError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::DuplicateName { .. } => Self::Conflict(e.to_string()),
            DbError::Inconsistent(message) => Self::Internal(message),
            DbError::Sqlx(_) | DbError::UnknownTag { .. } => Self::Store(e),
        }
    }
}
