use super::{CACHE_TTL_SECS, product_cache_key, product_list_cache_key};
use crate::abstract_trait::{
    DynImageQueryRepository, DynProductQueryRepository, ProductQueryServiceTrait,
};
use crate::domain::{
    requests::ProductListQuery,
    response::{ApiResponse, ProductResponse, build_product_response, build_product_responses},
};
use crate::storage::FileStorage;
use async_trait::async_trait;
use chrono::Duration;
use shared::cache::CacheStore;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    images: DynImageQueryRepository,
    cache_store: Arc<CacheStore>,
    storage: Arc<FileStorage>,
}

impl ProductQueryService {
    pub fn new(
        query: DynProductQueryRepository,
        images: DynImageQueryRepository,
        cache_store: Arc<CacheStore>,
        storage: Arc<FileStorage>,
    ) -> Self {
        Self {
            query,
            images,
            cache_store,
            storage,
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        filter: &ProductListQuery,
        raw_query: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let cache_key = product_list_cache_key(raw_query);

        if let Some(cached) = self
            .cache_store
            .get_from_cache::<ApiResponse<Vec<ProductResponse>>>(&cache_key)
            .await
        {
            info!("✅ Served {} products from cache", cached.data.len());
            return Ok(cached);
        }

        let products = self
            .query
            .find_all(filter)
            .await
            .map_err(ServiceError::Repo)?;

        let product_ids: Vec<i64> = products.iter().map(|p| p.product_id).collect();
        let images = self
            .images
            .find_by_product_ids(&product_ids)
            .await
            .map_err(ServiceError::Repo)?;

        let response = ApiResponse::success(
            "Products retrieved successfully",
            build_product_responses(products, images, &self.storage),
        );

        self.cache_store
            .set_to_cache(&cache_key, &response, Duration::seconds(CACHE_TTL_SECS))
            .await;

        info!("✅ Retrieved {} products from DB", response.data.len());
        Ok(response)
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let cache_key = product_cache_key(id);

        if let Some(cached) = self
            .cache_store
            .get_from_cache::<ApiResponse<ProductResponse>>(&cache_key)
            .await
        {
            info!("✅ Served product {id} from cache");
            return Ok(cached);
        }

        let product = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        let images = self
            .images
            .find_by_product(id)
            .await
            .map_err(ServiceError::Repo)?;

        let response = ApiResponse::success(
            "Product retrieved successfully",
            build_product_response(product, images, &self.storage),
        );

        self.cache_store
            .set_to_cache(&cache_key, &response, Duration::seconds(CACHE_TTL_SECS))
            .await;

        Ok(response)
    }
}
