use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use shared::model::Image as ImageModel;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ImageResponse {
    pub id: i64,
    /// absolute URL of the stored file
    pub image: String,
    pub is_primary: bool,
}

impl ImageResponse {
    pub fn from_model(model: &ImageModel, storage: &FileStorage) -> Self {
        ImageResponse {
            id: model.image_id,
            image: storage.public_url(&model.file_path),
            is_primary: model.is_primary,
        }
    }
}

/// Body of `GET /images/{id}/`: only the constructed URL, never the record.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ImageUrlResponse {
    pub image_url: String,
}
