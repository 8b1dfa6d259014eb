use crate::domain::{
    requests::{CreateCommentRequest, NewComment, UpdateCommentRequest},
    response::{ApiResponse, CommentResponse},
};
use crate::storage::UploadedFile;
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::Comment as CommentModel;
use std::sync::Arc;

pub type DynCommentQueryRepository = Arc<dyn CommentQueryRepositoryTrait + Send + Sync>;
pub type DynCommentCommandRepository = Arc<dyn CommentCommandRepositoryTrait + Send + Sync>;
pub type DynCommentQueryService = Arc<dyn CommentQueryServiceTrait + Send + Sync>;
pub type DynCommentCommandService = Arc<dyn CommentCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CommentQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<CommentModel>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<CommentModel>, RepositoryError>;
}

#[async_trait]
pub trait CommentCommandRepositoryTrait {
    async fn create(&self, comment: &NewComment) -> Result<CommentModel, RepositoryError>;
    async fn update(
        &self,
        id: i64,
        req: &UpdateCommentRequest,
    ) -> Result<CommentModel, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CommentQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CommentResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<CommentResponse>, ServiceError>;
}

#[async_trait]
pub trait CommentCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateCommentRequest,
        caller: Option<i64>,
        attachment: Option<UploadedFile>,
    ) -> Result<ApiResponse<CommentResponse>, ServiceError>;
    async fn update(
        &self,
        id: i64,
        req: &UpdateCommentRequest,
        caller: Option<i64>,
    ) -> Result<ApiResponse<CommentResponse>, ServiceError>;
    async fn delete(&self, id: i64, caller: Option<i64>)
    -> Result<ApiResponse<bool>, ServiceError>;
}
