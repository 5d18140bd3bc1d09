//! Tag repository
//!
//! Handles tag CRUD:
//! - create / rename: the UNIQUE(name) constraint decides duplicates
//! - delete: association cleanup and row delete in one transaction

use sqlx::SqlitePool;

use super::{is_unique_violation, DbError};
use crate::db::Store;
use crate::models::{EntityId, Tag, TagName};

/// Tag repository
#[derive(Debug, Clone)]
pub struct TagRepo {
    pool: SqlitePool,
}

impl TagRepo {
    pub fn new(store: &Store) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    /// Insert a tag under a freshly generated id.
    ///
    /// Fails with `DuplicateName` if another tag already has `name`.
    pub async fn create(&self, name: TagName) -> Result<Tag, DbError> {
        let id = EntityId::generate();

        let result = sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?)")
            .bind(id.as_str())
            .bind(name.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(tag_id = %id, name = name.as_str(), "Created tag");
                Ok(Tag {
                    id: id.into_string(),
                    name: name.into_string(),
                })
            }
            Err(e) if is_unique_violation(&e) => Err(DbError::DuplicateName {
                name: name.into_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// All tags ordered by name ascending.
    pub async fn list(&self) -> Result<Vec<Tag>, DbError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    /// Get a single tag by id.
    pub async fn get(&self, id: &EntityId) -> Result<Tag, DbError> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "tag",
                id: id.to_string(),
            })
    }

    /// Rename a tag in place.
    ///
    /// A single UPDATE both checks and applies the change, so two concurrent
    /// renames to the same name cannot both succeed: the loser trips the
    /// UNIQUE constraint and gets `DuplicateName`. Renaming a tag to its
    /// current name succeeds.
    pub async fn rename(&self, id: &EntityId, name: TagName) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ?")
            .bind(name.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await;

        let affected = match result {
            Ok(done) => done.rows_affected(),
            Err(e) if is_unique_violation(&e) => {
                return Err(DbError::DuplicateName {
                    name: name.into_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if affected == 0 {
            return Err(DbError::NotFound {
                resource: "tag",
                id: id.to_string(),
            });
        }

        tracing::debug!(tag_id = %id, name = name.as_str(), "Renamed tag");
        Ok(())
    }

    /// Delete a tag and every association that mentions it.
    ///
    /// Fails with `NotFound` when no tag row was removed; the association
    /// cleanup is rolled back with it (it is a no-op in that case anyway).
    pub async fn delete(&self, id: &EntityId) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("DELETE FROM link_tags WHERE tag_id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::NotFound {
                resource: "tag",
                id: id.to_string(),
            });
        }

        tx.commit().await?;
        tracing::debug!(tag_id = %id, detached, "Deleted tag");
        Ok(())
    }
}
