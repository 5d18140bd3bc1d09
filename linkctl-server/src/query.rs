//! Query layer: tag-set matching and link hydration
//!
//! - `TagQuery` is the normalised set of tag names a caller filters by, with
//!   AND (superset) semantics.
//! - `hydrate_links` folds a left-join-shaped row stream
//!   (`link x link_tags x tags`) into links carrying their tag sets.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use sqlx::FromRow;

use crate::models::{Link, Tag};

/// Set of tag names a link must carry all of to match.
///
/// Names are trimmed and deduplicated; empty names are dropped. An empty
/// query matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    names: BTreeSet<String>,
}

impl TagQuery {
    /// Parse a comma-separated list such as `rock, live,2020`.
    ///
    /// # Example
    /// ```
    /// use linkctl_server::query::TagQuery;
    ///
    /// let q = TagQuery::parse("rock, live,,rock");
    /// assert_eq!(q.names().collect::<Vec<_>>(), vec!["live", "rock"]);
    /// assert!(TagQuery::parse(" , ").is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self::from_names(raw.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_owned())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Requested names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// True when every requested name appears in `tag_names`.
    pub fn is_satisfied_by<'a, I>(&self, tag_names: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.names.is_empty() {
            return false;
        }
        let present: HashSet<&str> = tag_names.into_iter().collect();
        self.names.iter().all(|n| present.contains(n.as_str()))
    }

    /// Keep only the links whose tag-name set is a superset of this query.
    pub fn filter(&self, links: Vec<Link>) -> Vec<Link> {
        links
            .into_iter()
            .filter(|l| self.is_satisfied_by(l.tag_names()))
            .collect()
    }
}

/// One row of `links LEFT JOIN link_tags LEFT JOIN tags`.
///
/// Tag columns are NULL for links without associations.
#[derive(Debug, Clone, FromRow)]
pub struct LinkTagRow {
    pub link_id: String,
    pub url: String,
    pub tag_id: Option<String>,
    pub tag_name: Option<String>,
}

/// Group joined rows into hydrated links, ordered by link id ascending.
///
/// Tags keep the order they arrive in; a link seen only with NULL tag
/// columns gets an empty tag set.
pub fn hydrate_links<I>(rows: I) -> Vec<Link>
where
    I: IntoIterator<Item = LinkTagRow>,
{
    let mut by_id: BTreeMap<String, Link> = BTreeMap::new();

    for row in rows {
        let link = by_id.entry(row.link_id.clone()).or_insert_with(|| Link {
            id: row.link_id,
            url: row.url,
            tags: Vec::new(),
        });

        if let (Some(id), Some(name)) = (row.tag_id, row.tag_name) {
            link.tags.push(Tag { id, name });
        }
    }

    by_id.into_values().collect()
}
