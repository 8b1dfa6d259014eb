use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, error};

pub type DynCacheBackend = Arc<dyn CacheBackend + Send + Sync>;

/// Raw key-value operations behind `CacheStore`. Every method is best-effort:
/// a backend failure is logged and swallowed, reads degrade to a miss.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, expiration: Duration);
    async fn delete(&self, key: &str);
    async fn delete_by_pattern(&self, pattern: &str);
}

pub struct RedisBackend {
    redis_pool: Pool,
}

impl RedisBackend {
    pub fn new(redis_pool: Pool) -> Self {
        Self { redis_pool }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.get_conn().await?;
        let result: redis::RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;

        match result {
            Ok(value) => value,
            Err(e) => {
                error!("Redis get error for key '{}': {:?}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, expiration: Duration) {
        if let Some(mut conn) = self.get_conn().await {
            let result: redis::RedisResult<()> = redis::pipe()
                .cmd("SET")
                .arg(key)
                .arg(value)
                .ignore()
                .cmd("EXPIRE")
                .arg(key)
                .arg(expiration.num_seconds())
                .query_async(&mut conn)
                .await;

            match result {
                Ok(_) => debug!("Cached key '{}' with TTL {:?}", key, expiration),
                Err(e) => error!("Failed to set cache key '{}': {:?}", key, e),
            }
        }
    }

    async fn delete(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Failed to delete key '{}': {:?}", key, e);
        }
    }

    async fn delete_by_pattern(&self, pattern: &str) {
        let Some(mut conn) = self.get_conn().await else {
            return;
        };

        let mut cursor: u64 = 0;
        loop {
            let scanned: redis::RedisResult<(u64, Vec<String>)> = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await;

            let (next_cursor, keys) = match scanned {
                Ok(res) => res,
                Err(e) => {
                    error!("Redis scan error for pattern '{}': {:?}", pattern, e);
                    return;
                }
            };

            if !keys.is_empty()
                && let Err(e) = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async::<()>(&mut conn)
                    .await
            {
                error!("Failed to delete keys for pattern '{}': {:?}", pattern, e);
                return;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!("Deleted cache keys matching '{}'", pattern);
    }
}

struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-process backend with the same TTL and pattern semantics as redis.
/// Used by tests; also usable as a fallback when no redis is deployed.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, expiration: Duration) {
        // non-positive TTLs expire immediately, mirroring redis EXPIRE
        let expires_at = match expiration.to_std() {
            Ok(d) => Instant::now().checked_add(d),
            Err(_) => Some(Instant::now()),
        };
        self.entries.write().await.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    async fn delete_by_pattern(&self, pattern: &str) {
        self.entries
            .write()
            .await
            .retain(|key, _| !glob_match(pattern, key));
    }
}

/// Redis-style glob where `*` matches any run of characters.
fn glob_match(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or("");
    if !key.starts_with(first) {
        return false;
    }

    let mut rest = &key[first.len()..];
    let mut middle: Vec<&str> = parts.collect();
    let Some(last) = middle.pop() else {
        // no '*' in the pattern at all
        return rest.is_empty();
    };

    for part in middle {
        if part.is_empty() {
            continue;
        }
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matches_prefix_patterns() {
        assert!(glob_match("product_list_*", "product_list_"));
        assert!(glob_match("product_list_*", "product_list_category=1"));
        assert!(!glob_match("product_list_*", "product_7"));
        assert!(!glob_match("product_list_*", "category_list"));
    }

    #[test]
    fn glob_without_wildcard_is_exact() {
        assert!(glob_match("category_list", "category_list"));
        assert!(!glob_match("category_list", "category_list_2"));
    }

    #[test]
    fn glob_with_inner_wildcard() {
        assert!(glob_match("product_*_v2", "product_list_v2"));
        assert!(!glob_match("product_*_v2", "product_list_v1"));
    }

    #[tokio::test]
    async fn memory_backend_honors_ttl_and_pattern_delete() {
        let backend = MemoryBackend::new();

        backend.set("product_list_a", "[1]", Duration::seconds(60)).await;
        backend.set("product_list_b", "[2]", Duration::seconds(60)).await;
        backend.set("product_9", "{}", Duration::seconds(60)).await;

        assert_eq!(backend.get("product_list_a").await.as_deref(), Some("[1]"));

        backend.delete_by_pattern("product_list_*").await;
        assert!(backend.get("product_list_a").await.is_none());
        assert!(backend.get("product_list_b").await.is_none());
        assert_eq!(backend.get("product_9").await.as_deref(), Some("{}"));

        backend.set("gone", "x", Duration::seconds(-1)).await;
        assert!(backend.get("gone").await.is_none());
    }
}
