//! Opaque entity identifiers

use uuid::Uuid;

use super::validation::non_empty;
use super::ValidationError;

/// Validated, non-empty identifier of a tag or link.
///
/// Identifiers are opaque strings; the server mints UUID v4 values but never
/// parses ids supplied by clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Validate a client-supplied id. `field` names the id in error messages.
    pub fn parse(s: &str, field: &'static str) -> Result<Self, ValidationError> {
        non_empty(s, field).map(Self)
    }

    /// Mint a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
