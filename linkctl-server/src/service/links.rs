//! Link association service
//!
//! Orchestrates `LinkRepo` calls into one business operation: resolve or
//! create the link for a URL, replace its whole tag set, and hand back the
//! hydrated result. Tag sets are always replaced, never merged.

use super::{ServiceError, ServiceResult};
use crate::db::LinkRepo;
use crate::models::{EntityId, Link, LinkUrl};
use crate::query::TagQuery;

#[derive(Debug, Clone)]
pub struct LinkService {
    repo: LinkRepo,
}

impl LinkService {
    pub fn new(repo: LinkRepo) -> Self {
        Self { repo }
    }

    /// Create the link for `url` (or reuse the existing one) and set its
    /// tags to exactly `tag_ids`. Both writes commit together or not at all.
    pub async fn create_or_update(&self, url: &str, tag_ids: &[String]) -> ServiceResult<Link> {
        let url = LinkUrl::new(url)?;
        let tag_ids = tag_ids
            .iter()
            .map(|id| EntityId::parse(id, "tag id"))
            .collect::<Result<Vec<_>, _>>()?;

        let link_id = self.repo.upsert_with_tags(&url, &tag_ids).await?;

        match self.repo.get_with_tags(&link_id).await? {
            Some(link) => Ok(link),
            None => {
                tracing::error!(link_id = %link_id, url = url.as_str(), "Link vanished after write");
                Err(ServiceError::Internal(format!(
                    "link '{}' not found after write",
                    link_id
                )))
            }
        }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Link>> {
        Ok(self.repo.list_all_with_tags().await?)
    }

    /// Links carrying every tag named in `query`; empty query, empty result.
    pub async fn list_by_tags(&self, query: &TagQuery) -> ServiceResult<Vec<Link>> {
        Ok(self.repo.list_matching_all(query).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = EntityId::parse(id, "link id")?;
        Ok(self.repo.delete(&id).await?)
    }
}
