//! Validation error types

use std::fmt;

/// Validation error for domain models and request bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or missing when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Request body could not be decoded
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Malformed { reason } => write!(f, "invalid input: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `raw` and reject it when nothing is left.
pub(crate) fn non_empty(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// [`non_empty`] plus an upper bound in characters.
pub(crate) fn required(
    raw: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = non_empty(raw, field)?;
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}
