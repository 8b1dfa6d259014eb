use crate::domain::response::product::ProductResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub products: Vec<ProductResponse>,
}
