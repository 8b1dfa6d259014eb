use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Metadata for attaching a new image; the file itself arrives as the
/// `image` part of the multipart body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateImageRequest {
    /// id of the product the image belongs to
    pub product: i64,

    #[serde(default)]
    pub is_primary: bool,
}
