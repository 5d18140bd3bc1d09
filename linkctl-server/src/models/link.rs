//! Link record and URL validation

use serde::{Deserialize, Serialize};

use super::validation::non_empty;
use super::{Tag, ValidationError};

/// A stored URL hydrated with its full tag set.
///
/// `tags` is always present; a link without associations carries an empty
/// vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub url: String,
    pub tags: Vec<Tag>,
}

impl Link {
    /// Names of every tag attached to this link.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}

/// Validated link URL.
///
/// URLs are stored verbatim (after trimming); two links are the same link
/// when their URLs are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkUrl(String);

impl LinkUrl {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        non_empty(s, "url").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LinkUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_trimmed() {
        let url = LinkUrl::new("  http://x  ").unwrap();
        assert_eq!(url.as_str(), "http://x");
    }

    #[test]
    fn long_urls_are_accepted() {
        let raw = format!("http://x/{}", "a".repeat(10_000));
        assert_eq!(LinkUrl::new(&raw).unwrap().as_str(), raw);
    }

    #[test]
    fn url_required() {
        assert_eq!(
            LinkUrl::new("").unwrap_err(),
            ValidationError::Empty { field: "url" }
        );
    }

    #[test]
    fn tag_names_iterates_in_order() {
        let link = Link {
            id: "l1".into(),
            url: "http://x".into(),
            tags: vec![
                Tag { id: "a".into(), name: "live".into() },
                Tag { id: "b".into(), name: "rock".into() },
            ],
        };
        assert_eq!(link.tag_names().collect::<Vec<_>>(), vec!["live", "rock"]);
    }
}
