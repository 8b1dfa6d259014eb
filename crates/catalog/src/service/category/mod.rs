mod command;
mod query;

pub use self::command::{CategoryCommandService, CategoryCommandServiceDeps};
pub use self::query::CategoryQueryService;

use crate::abstract_trait::{DynImageQueryRepository, DynProductQueryRepository};
use crate::domain::response::{CategoryResponse, ProductResponse, build_product_responses};
use crate::storage::FileStorage;
use shared::errors::RepositoryError;
use shared::model::Category as CategoryModel;
use std::collections::HashMap;

pub(crate) const CATEGORY_LIST_CACHE_KEY: &str = "category_list";
pub(crate) const CACHE_TTL_SECS: i64 = 3600;

/// Nests every category's products (and their images) the way list and
/// detail responses expose them.
pub(crate) async fn assemble_categories(
    categories: Vec<CategoryModel>,
    products: &DynProductQueryRepository,
    images: &DynImageQueryRepository,
    storage: &FileStorage,
) -> Result<Vec<CategoryResponse>, RepositoryError> {
    let category_ids: Vec<i64> = categories.iter().map(|c| c.category_id).collect();
    let product_models = products.find_by_category_ids(&category_ids).await?;

    let product_ids: Vec<i64> = product_models.iter().map(|p| p.product_id).collect();
    let image_models = images.find_by_product_ids(&product_ids).await?;

    let mut by_category: HashMap<i64, Vec<ProductResponse>> = HashMap::new();
    for product in build_product_responses(product_models, image_models, storage) {
        by_category.entry(product.category).or_default().push(product);
    }

    Ok(categories
        .into_iter()
        .map(|category| CategoryResponse {
            id: category.category_id,
            name: category.name,
            products: by_category
                .remove(&category.category_id)
                .unwrap_or_default(),
        })
        .collect())
}
