use crate::abstract_trait::{CommentQueryServiceTrait, DynCommentQueryRepository};
use crate::domain::response::{ApiResponse, CommentResponse};
use crate::storage::FileStorage;
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub struct CommentQueryService {
    query: DynCommentQueryRepository,
    storage: Arc<FileStorage>,
}

impl CommentQueryService {
    pub fn new(query: DynCommentQueryRepository, storage: Arc<FileStorage>) -> Self {
        Self { query, storage }
    }
}

#[async_trait]
impl CommentQueryServiceTrait for CommentQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CommentResponse>>, ServiceError> {
        let comments = self.query.find_all().await.map_err(ServiceError::Repo)?;

        let data = comments
            .into_iter()
            .map(|comment| CommentResponse::from_model(comment, &self.storage))
            .collect();

        Ok(ApiResponse::success("Comments retrieved successfully", data))
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<CommentResponse>, ServiceError> {
        let comment = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse::success(
            "Comment retrieved successfully",
            CommentResponse::from_model(comment, &self.storage),
        ))
    }
}
