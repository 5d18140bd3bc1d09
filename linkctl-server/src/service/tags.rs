//! Tag service: input validation in front of `TagRepo`

use super::ServiceResult;
use crate::db::TagRepo;
use crate::models::{EntityId, Tag, TagName};

#[derive(Debug, Clone)]
pub struct TagService {
    repo: TagRepo,
}

impl TagService {
    pub fn new(repo: TagRepo) -> Self {
        Self { repo }
    }

    pub async fn create(&self, name: &str) -> ServiceResult<Tag> {
        let name = TagName::new(name)?;
        Ok(self.repo.create(name).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Tag>> {
        Ok(self.repo.list().await?)
    }

    pub async fn rename(&self, id: &str, name: &str) -> ServiceResult<()> {
        let id = EntityId::parse(id, "tag id")?;
        let name = TagName::new(name)?;
        Ok(self.repo.rename(&id, name).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = EntityId::parse(id, "tag id")?;
        Ok(self.repo.delete(&id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::ValidationError;
    use crate::service::ServiceError;

    async fn service() -> TagService {
        let store = Store::open_in_memory().await.expect("store");
        TagService::new(TagRepo::new(&store))
    }

    #[tokio::test]
    async fn create_validates_before_store() {
        let svc = service().await;
        let err = svc.create("   ").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidInput(ValidationError::Empty { field: "tag name" })
        ));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let svc = service().await;
        svc.create("ambient").await.unwrap();
        assert!(matches!(
            svc.create("ambient").await.unwrap_err(),
            ServiceError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn rename_requires_id_and_name() {
        let svc = service().await;
        assert!(matches!(
            svc.rename("", "rock").await.unwrap_err(),
            ServiceError::InvalidInput(ValidationError::Empty { field: "tag id" })
        ));
        assert!(matches!(
            svc.rename("abc", "").await.unwrap_err(),
            ServiceError::InvalidInput(ValidationError::Empty { field: "tag name" })
        ));
    }

    #[tokio::test]
    async fn rename_and_delete_missing_are_not_found() {
        let svc = service().await;
        assert!(matches!(
            svc.rename("ghost", "rock").await.unwrap_err(),
            ServiceError::NotFound { resource: "tag", .. }
        ));
        assert!(matches!(
            svc.delete("ghost").await.unwrap_err(),
            ServiceError::NotFound { resource: "tag", .. }
        ));
    }

    #[tokio::test]
    async fn rename_conflict_leaves_both_tags() {
        let svc = service().await;
        svc.create("rock").await.unwrap();
        let live = svc.create("live").await.unwrap();

        assert!(matches!(
            svc.rename(&live.id, "rock").await.unwrap_err(),
            ServiceError::Conflict(_)
        ));

        let names: Vec<_> = svc.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["live", "rock"]);
    }
}
