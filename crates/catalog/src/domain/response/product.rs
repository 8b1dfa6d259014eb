use crate::domain::response::image::ImageResponse;
use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use shared::model::{Image as ImageModel, Product as ProductModel};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    /// id of the owning category
    pub category: i64,
    pub images: Vec<ImageResponse>,
}

pub fn build_product_response(
    product: ProductModel,
    images: Vec<ImageModel>,
    storage: &FileStorage,
) -> ProductResponse {
    ProductResponse {
        id: product.product_id,
        name: product.name,
        description: product.description,
        price: product.price,
        category: product.category_id,
        images: images
            .iter()
            .map(|img| ImageResponse::from_model(img, storage))
            .collect(),
    }
}

/// Maps products plus their (unsorted) image rows into nested responses.
pub fn build_product_responses(
    products: Vec<ProductModel>,
    images: Vec<ImageModel>,
    storage: &FileStorage,
) -> Vec<ProductResponse> {
    let mut by_product: HashMap<i64, Vec<ImageModel>> = HashMap::new();
    for image in images {
        by_product.entry(image.product_id).or_default().push(image);
    }

    products
        .into_iter()
        .map(|product| {
            let product_images = by_product.remove(&product.product_id).unwrap_or_default();
            build_product_response(product, product_images, storage)
        })
        .collect()
}
