use crate::domain::{
    requests::CreateImageRequest,
    response::{ApiResponse, ImageResponse, ImageUrlResponse},
};
use crate::storage::UploadedFile;
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::Image as ImageModel;
use std::sync::Arc;

pub type DynImageQueryRepository = Arc<dyn ImageQueryRepositoryTrait + Send + Sync>;
pub type DynImageCommandRepository = Arc<dyn ImageCommandRepositoryTrait + Send + Sync>;
pub type DynImageQueryService = Arc<dyn ImageQueryServiceTrait + Send + Sync>;
pub type DynImageCommandService = Arc<dyn ImageCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ImageQueryRepositoryTrait {
    async fn find_by_id(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError>;
    async fn find_by_product(&self, product_id: i64) -> Result<Vec<ImageModel>, RepositoryError>;
    async fn find_by_product_ids(
        &self,
        product_ids: &[i64],
    ) -> Result<Vec<ImageModel>, RepositoryError>;
}

#[async_trait]
pub trait ImageCommandRepositoryTrait {
    /// Inserts an image row; when `is_primary` is set, any previous primary
    /// image of the product is demoted in the same transaction.
    async fn create(
        &self,
        product_id: i64,
        file_path: &str,
        is_primary: bool,
    ) -> Result<ImageModel, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError>;
    /// Removes the current primary image rows and returns them so stored
    /// files can be cleaned up.
    async fn delete_primary_for_product(
        &self,
        product_id: i64,
    ) -> Result<Vec<ImageModel>, RepositoryError>;
}

#[async_trait]
pub trait ImageQueryServiceTrait {
    async fn find_url(&self, id: i64) -> Result<ImageUrlResponse, ServiceError>;
}

#[async_trait]
pub trait ImageCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateImageRequest,
        file: UploadedFile,
    ) -> Result<ApiResponse<ImageResponse>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<ApiResponse<bool>, ServiceError>;
}
