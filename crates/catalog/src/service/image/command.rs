use crate::abstract_trait::{
    DynImageCommandRepository, DynProductQueryRepository, ImageCommandServiceTrait,
};
use crate::domain::{
    requests::CreateImageRequest,
    response::{ApiResponse, ImageResponse},
};
use crate::storage::{FileStorage, UploadedFile};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use tracing::info;

pub struct ImageCommandService {
    command: DynImageCommandRepository,
    products: DynProductQueryRepository,
    storage: Arc<FileStorage>,
}

impl ImageCommandService {
    pub fn new(
        command: DynImageCommandRepository,
        products: DynProductQueryRepository,
        storage: Arc<FileStorage>,
    ) -> Self {
        Self {
            command,
            products,
            storage,
        }
    }
}

#[async_trait]
impl ImageCommandServiceTrait for ImageCommandService {
    async fn create(
        &self,
        req: &CreateImageRequest,
        file: UploadedFile,
    ) -> Result<ApiResponse<ImageResponse>, ServiceError> {
        let product_exists = self
            .products
            .find_by_id(req.product)
            .await
            .map_err(ServiceError::Repo)?
            .is_some();
        if !product_exists {
            return Err(ServiceError::Validation(vec![format!(
                "product: invalid product id {}",
                req.product
            )]));
        }

        let path = self.storage.save("products", &file).await?;
        let image = self
            .command
            .create(req.product, &path, req.is_primary)
            .await
            .map_err(ServiceError::Repo)?;

        info!(
            "✅ Image {} attached to product {}",
            image.image_id, req.product
        );
        Ok(ApiResponse::success(
            "Image created successfully",
            ImageResponse::from_model(&image, &self.storage),
        ))
    }

    async fn delete(&self, id: i64) -> Result<ApiResponse<bool>, ServiceError> {
        let removed = self
            .command
            .delete(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        self.storage.remove(&removed.file_path).await;

        Ok(ApiResponse::success("Image deleted successfully", true))
    }
}
