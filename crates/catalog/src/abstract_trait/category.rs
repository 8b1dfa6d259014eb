use crate::domain::{
    requests::{CreateCategoryRequest, UpdateCategoryRequest},
    response::{ApiResponse, CategoryResponse},
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::Category as CategoryModel;
use std::sync::Arc;

pub type DynCategoryQueryRepository = Arc<dyn CategoryQueryRepositoryTrait + Send + Sync>;
pub type DynCategoryCommandRepository = Arc<dyn CategoryCommandRepositoryTrait + Send + Sync>;
pub type DynCategoryQueryService = Arc<dyn CategoryQueryServiceTrait + Send + Sync>;
pub type DynCategoryCommandService = Arc<dyn CategoryCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryModel>, RepositoryError>;
}

#[async_trait]
pub trait CategoryCommandRepositoryTrait {
    async fn create(&self, req: &CreateCategoryRequest) -> Result<CategoryModel, RepositoryError>;
    async fn update(
        &self,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CategoryQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
}

#[async_trait]
pub trait CategoryCommandServiceTrait {
    async fn create(
        &self,
        caller: Option<i64>,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn update(
        &self,
        caller: Option<i64>,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn delete(&self, caller: Option<i64>, id: i64)
    -> Result<ApiResponse<bool>, ServiceError>;
}
