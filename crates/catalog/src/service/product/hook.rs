use super::{PRODUCT_LIST_PATTERN, product_cache_key};
use crate::abstract_trait::ProductWriteHook;
use async_trait::async_trait;
use shared::cache::CacheStore;
use std::sync::Arc;
use tracing::debug;

/// Cache side of the product write hook: whenever a product row is saved,
/// the detail entry and every list entry are dropped, regardless of which
/// code path performed the write.
pub struct ProductCacheInvalidator {
    cache_store: Arc<CacheStore>,
}

impl ProductCacheInvalidator {
    pub fn new(cache_store: Arc<CacheStore>) -> Self {
        Self { cache_store }
    }
}

#[async_trait]
impl ProductWriteHook for ProductCacheInvalidator {
    async fn on_product_saved(&self, product_id: i64) {
        debug!("Invalidating product cache after save of {product_id}");
        self.cache_store
            .delete_from_cache(&product_cache_key(product_id))
            .await;
        self.cache_store.delete_by_pattern(PRODUCT_LIST_PATTERN).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn save_drops_detail_and_every_list_entry() {
        let cache = Arc::new(CacheStore::in_memory());
        cache
            .set_to_cache("product_7", &"detail", Duration::seconds(3600))
            .await;
        cache
            .set_to_cache("product_list_", &"all", Duration::seconds(3600))
            .await;
        cache
            .set_to_cache("product_list_category=1", &"filtered", Duration::seconds(3600))
            .await;
        cache
            .set_to_cache("category_list", &"categories", Duration::seconds(3600))
            .await;

        let hook = ProductCacheInvalidator::new(cache.clone());
        hook.on_product_saved(7).await;

        assert!(cache.get_from_cache::<String>("product_7").await.is_none());
        assert!(cache.get_from_cache::<String>("product_list_").await.is_none());
        assert!(
            cache
                .get_from_cache::<String>("product_list_category=1")
                .await
                .is_none()
        );
        // unrelated entries survive
        assert_eq!(
            cache.get_from_cache::<String>("category_list").await,
            Some("categories".to_string())
        );
    }
}
