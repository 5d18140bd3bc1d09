//! Link repository
//!
//! Handles links and their tag associations:
//! - get-or-create by URL, recovering from the insert race via UNIQUE(url)
//! - atomic replace of a link's whole tag set (transaction)
//! - both of the above as one transaction for the upsert endpoint
//! - hydrated reads via a single LEFT JOIN (no N+1)

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use super::{is_foreign_key_violation, DbError};
use crate::db::Store;
use crate::models::{EntityId, Link, LinkUrl};
use crate::query::{hydrate_links, LinkTagRow, TagQuery};

/// Shared projection for hydrated reads; callers append WHERE / ORDER BY.
const HYDRATED_SELECT: &str = r#"
    SELECT l.id AS link_id, l.url AS url, t.id AS tag_id, t.name AS tag_name
    FROM links l
    LEFT JOIN link_tags lt ON lt.link_id = l.id
    LEFT JOIN tags t ON t.id = lt.tag_id
"#;

/// Link repository
#[derive(Debug, Clone)]
pub struct LinkRepo {
    pool: SqlitePool,
}

impl LinkRepo {
    pub fn new(store: &Store) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    /// Return the id of the link for `url`, creating the link if needed.
    pub async fn get_or_create(&self, url: &LinkUrl) -> Result<EntityId, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::get_or_create_tx(&mut tx, url).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Replace the whole tag set of a link.
    ///
    /// Readers see either the old set or the new one. Duplicate ids are
    /// collapsed. An unknown tag id fails the foreign key, rolling back to
    /// the previous associations.
    pub async fn replace_tags(&self, link_id: &EntityId, tag_ids: &[EntityId]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        Self::replace_tags_tx(&mut tx, link_id, tag_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Get-or-create the link for `url` and set its tags, as one transaction.
    ///
    /// Any failure rolls back both steps: a new URL paired with an unknown
    /// tag id leaves no link row behind.
    pub async fn upsert_with_tags(&self, url: &LinkUrl, tag_ids: &[EntityId]) -> Result<EntityId, DbError> {
        let mut tx = self.pool.begin().await?;
        let link_id = Self::get_or_create_tx(&mut tx, url).await?;
        Self::replace_tags_tx(&mut tx, &link_id, tag_ids).await?;
        tx.commit().await?;
        Ok(link_id)
    }

    /// The insert runs first so the transaction holds the write lock before
    /// it reads. When UNIQUE(url) rejects it (another writer got there first)
    /// the winner's id is re-read; a second miss is an inconsistency.
    async fn get_or_create_tx(tx: &mut Transaction<'_, Sqlite>, url: &LinkUrl) -> Result<EntityId, DbError> {
        let id = EntityId::generate();
        let inserted = sqlx::query("INSERT INTO links (id, url) VALUES (?, ?) ON CONFLICT(url) DO NOTHING")
            .bind(id.as_str())
            .bind(url.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if inserted == 1 {
            tracing::debug!(link_id = %id, url = url.as_str(), "Created link");
            return Ok(id);
        }

        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM links WHERE url = ?")
            .bind(url.as_str())
            .fetch_optional(&mut **tx)
            .await?;

        match row {
            Some((existing,)) => {
                EntityId::parse(&existing, "link id").map_err(|e| DbError::Inconsistent(e.to_string()))
            }
            None => {
                tracing::warn!(url = url.as_str(), "URL rejected as duplicate but not found");
                Err(DbError::Inconsistent(format!(
                    "url '{}' rejected as duplicate but not found",
                    url.as_str()
                )))
            }
        }
    }

    async fn replace_tags_tx(
        tx: &mut Transaction<'_, Sqlite>,
        link_id: &EntityId,
        tag_ids: &[EntityId],
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM link_tags WHERE link_id = ?")
            .bind(link_id.as_str())
            .execute(&mut **tx)
            .await?;

        let link_exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM links WHERE id = ?)")
            .bind(link_id.as_str())
            .fetch_one(&mut **tx)
            .await?;

        if !link_exists.0 {
            return Err(DbError::NotFound {
                resource: "link",
                id: link_id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for tag_id in tag_ids.iter().filter(|id| seen.insert(id.as_str())) {
            let result = sqlx::query("INSERT INTO link_tags (link_id, tag_id) VALUES (?, ?)")
                .bind(link_id.as_str())
                .bind(tag_id.as_str())
                .execute(&mut **tx)
                .await;

            match result {
                Ok(_) => {}
                Err(e) if is_foreign_key_violation(&e) => {
                    tracing::debug!(link_id = %link_id, tag_id = %tag_id, "Unknown tag in replace");
                    return Err(DbError::UnknownTag {
                        link_id: link_id.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(link_id = %link_id, tags = seen.len(), "Replaced link tags");
        Ok(())
    }

    /// Every link with its full tag set, ordered by link id.
    pub async fn list_all_with_tags(&self) -> Result<Vec<Link>, DbError> {
        let sql = format!("{HYDRATED_SELECT} ORDER BY l.id, t.name");
        let rows = sqlx::query_as::<_, LinkTagRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(hydrate_links(rows))
    }

    /// A single hydrated link, if it exists.
    pub async fn get_with_tags(&self, id: &EntityId) -> Result<Option<Link>, DbError> {
        let sql = format!("{HYDRATED_SELECT} WHERE l.id = ? ORDER BY t.name");
        let rows = sqlx::query_as::<_, LinkTagRow>(&sql)
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(hydrate_links(rows).into_iter().next())
    }

    /// Links whose tag-name set contains every name in `query`.
    ///
    /// SQL narrows the scan to links carrying at least one requested name;
    /// `TagQuery` then applies the superset match on the hydrated sets. An
    /// empty query returns no links.
    pub async fn list_matching_all(&self, query: &TagQuery) -> Result<Vec<Link>, DbError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(HYDRATED_SELECT);
        builder.push(
            " WHERE l.id IN (SELECT lt2.link_id FROM link_tags lt2 \
             JOIN tags t2 ON t2.id = lt2.tag_id WHERE t2.name IN (",
        );
        let mut names = builder.separated(", ");
        for name in query.names() {
            names.push_bind(name);
        }
        names.push_unseparated(")) ORDER BY l.id, t.name");

        let rows = builder
            .build_query_as::<LinkTagRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(query.filter(hydrate_links(rows)))
    }

    /// Delete a link and its associations.
    pub async fn delete(&self, id: &EntityId) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM link_tags WHERE link_id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::NotFound {
                resource: "link",
                id: id.to_string(),
            });
        }

        tx.commit().await?;
        tracing::debug!(link_id = %id, "Deleted link");
        Ok(())
    }
}
