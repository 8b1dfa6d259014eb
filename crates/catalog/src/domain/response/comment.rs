use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use shared::model::Comment as CommentModel;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CommentResponse {
    pub id: i64,
    pub body: String,
    pub rating: i32,
    /// id of the authoring user, null for anonymous comments
    pub user: Option<i64>,
    pub product: i64,
    pub good_comment: Option<String>,
    pub bad_comment: Option<String>,
    /// absolute URL of the attached file, if any
    pub attachment: Option<String>,
    pub created_at: String,
}

impl CommentResponse {
    pub fn from_model(model: CommentModel, storage: &FileStorage) -> Self {
        CommentResponse {
            id: model.comment_id,
            body: model.body,
            rating: model.rating,
            user: model.user_id,
            product: model.product_id,
            good_comment: model.good_comment,
            bad_comment: model.bad_comment,
            attachment: model
                .attachment
                .as_deref()
                .map(|path| storage.public_url(path)),
            created_at: model.created_at.to_rfc3339(),
        }
    }
}
