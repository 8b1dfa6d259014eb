use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub image_id: i64,
    pub product_id: i64,
    /// path relative to the media root, e.g. `products/<uuid>.jpg`
    pub file_path: String,
    pub is_primary: bool,
}
