use super::{CACHE_TTL_SECS, CATEGORY_LIST_CACHE_KEY, assemble_categories};
use crate::abstract_trait::{
    CategoryQueryServiceTrait, DynCategoryQueryRepository, DynImageQueryRepository,
    DynProductQueryRepository,
};
use crate::domain::response::{ApiResponse, CategoryResponse};
use crate::storage::FileStorage;
use async_trait::async_trait;
use chrono::Duration;
use shared::cache::CacheStore;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use tracing::info;

pub struct CategoryQueryService {
    query: DynCategoryQueryRepository,
    products: DynProductQueryRepository,
    images: DynImageQueryRepository,
    cache_store: Arc<CacheStore>,
    storage: Arc<FileStorage>,
}

impl CategoryQueryService {
    pub fn new(
        query: DynCategoryQueryRepository,
        products: DynProductQueryRepository,
        images: DynImageQueryRepository,
        cache_store: Arc<CacheStore>,
        storage: Arc<FileStorage>,
    ) -> Self {
        Self {
            query,
            products,
            images,
            cache_store,
            storage,
        }
    }
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        if let Some(cached) = self
            .cache_store
            .get_from_cache::<ApiResponse<Vec<CategoryResponse>>>(CATEGORY_LIST_CACHE_KEY)
            .await
        {
            info!("✅ Served {} categories from cache", cached.data.len());
            return Ok(cached);
        }

        let categories = self.query.find_all().await.map_err(ServiceError::Repo)?;
        let data = assemble_categories(categories, &self.products, &self.images, &self.storage)
            .await
            .map_err(ServiceError::Repo)?;

        let response = ApiResponse::success("Categories retrieved successfully", data);

        self.cache_store
            .set_to_cache(
                CATEGORY_LIST_CACHE_KEY,
                &response,
                Duration::seconds(CACHE_TTL_SECS),
            )
            .await;

        info!("✅ Retrieved {} categories from DB", response.data.len());
        Ok(response)
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let category = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        let mut data =
            assemble_categories(vec![category], &self.products, &self.images, &self.storage)
                .await
                .map_err(ServiceError::Repo)?;

        let category = data
            .pop()
            .ok_or_else(|| ServiceError::Internal("Category assembly came back empty".into()))?;

        Ok(ApiResponse::success(
            "Category retrieved successfully",
            category,
        ))
    }
}
