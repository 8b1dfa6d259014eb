use crate::domain::{
    requests::{CreateProductRequest, ProductListQuery, UpdateProductRequest},
    response::{ApiResponse, ProductResponse},
};
use crate::storage::UploadedFile;
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::Product as ProductModel;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;
pub type DynProductWriteHook = Arc<dyn ProductWriteHook + Send + Sync>;

/// Notified after every successful product write, whichever path performed
/// it. The cache layer subscribes to keep product entries coherent.
#[async_trait]
pub trait ProductWriteHook {
    async fn on_product_saved(&self, product_id: i64);
}

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self, filter: &ProductListQuery)
    -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_category_ids(
        &self,
        category_ids: &[i64],
    ) -> Result<Vec<ProductModel>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError>;
    async fn update(
        &self,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        filter: &ProductListQuery,
        raw_query: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateProductRequest,
        image: Option<UploadedFile>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update(
        &self,
        id: i64,
        req: &UpdateProductRequest,
        image: Option<UploadedFile>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<ApiResponse<bool>, ServiceError>;
}
