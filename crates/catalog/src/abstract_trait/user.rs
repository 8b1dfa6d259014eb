use async_trait::async_trait;
use shared::errors::RepositoryError;
use shared::model::User as UserModel;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserModel>, RepositoryError>;
}
