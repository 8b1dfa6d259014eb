use crate::abstract_trait::{DynImageQueryRepository, ImageQueryServiceTrait};
use crate::domain::response::ImageUrlResponse;
use crate::storage::FileStorage;
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub struct ImageQueryService {
    query: DynImageQueryRepository,
    storage: Arc<FileStorage>,
}

impl ImageQueryService {
    pub fn new(query: DynImageQueryRepository, storage: Arc<FileStorage>) -> Self {
        Self { query, storage }
    }
}

#[async_trait]
impl ImageQueryServiceTrait for ImageQueryService {
    async fn find_url(&self, id: i64) -> Result<ImageUrlResponse, ServiceError> {
        let image = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ImageUrlResponse {
            image_url: self.storage.public_url(&image.file_path),
        })
    }
}
