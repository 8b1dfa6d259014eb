use crate::cache::backend::{DynCacheBackend, MemoryBackend, RedisBackend};
use chrono::Duration;
use deadpool_redis::Pool;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{error, warn};

/// Read-through cache over a pluggable backend. All failures degrade to a
/// cache miss; callers always fall through to the persistence layer.
#[derive(Clone)]
pub struct CacheStore {
    backend: DynCacheBackend,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            backend: Arc::new(RedisBackend::new(redis_pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    pub fn with_backend(backend: DynCacheBackend) -> Self {
        Self { backend }
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let data = match self.backend.get(key).await {
            Some(data) => data,
            None => {
                warn!("Cache miss for key: {key}");
                return None;
            }
        };

        match serde_json::from_str::<T>(&data) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!(
                    "Failed to deserialize cached value for key '{}': {:?}",
                    key, e
                );
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        let json_data = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize data for key '{}': {:?}", key, e);
                return;
            }
        };

        self.backend.set(key, &json_data, expiration).await;
    }

    pub async fn delete_from_cache(&self, key: &str) {
        self.backend.delete(key).await;
    }

    pub async fn delete_by_pattern(&self, pattern: &str) {
        self.backend.delete_by_pattern(pattern).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_json_values() {
        let cache = CacheStore::in_memory();

        cache
            .set_to_cache("category_list", &vec![1, 2, 3], Duration::seconds(3600))
            .await;

        let cached: Option<Vec<i32>> = cache.get_from_cache("category_list").await;
        assert_eq!(cached, Some(vec![1, 2, 3]));

        cache.delete_from_cache("category_list").await;
        let cached: Option<Vec<i32>> = cache.get_from_cache("category_list").await;
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn type_mismatch_degrades_to_miss() {
        let cache = CacheStore::in_memory();

        cache
            .set_to_cache("product_1", &"not a number", Duration::seconds(60))
            .await;

        let cached: Option<i64> = cache.get_from_cache("product_1").await;
        assert!(cached.is_none());
    }
}
