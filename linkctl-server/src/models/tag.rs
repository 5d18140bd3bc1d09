//! Tag record and tag name validation

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::required;
use super::ValidationError;

/// Maximum length for tag names
const MAX_TAG_NAME_LEN: usize = 128;

/// A named label, unique by name, attachable to many links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Validated tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a new tag name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be empty after trimming
    /// - Max 128 characters
    ///
    /// # Example
    /// ```
    /// use linkctl_server::models::TagName;
    ///
    /// assert_eq!(TagName::new(" ambient ").unwrap().as_str(), "ambient");
    /// assert!(TagName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required(s, "tag name", MAX_TAG_NAME_LEN).map(Self)
    }

    /// Get the tag name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
