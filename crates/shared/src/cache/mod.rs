mod backend;
mod cache_store;

pub use self::backend::{CacheBackend, DynCacheBackend, MemoryBackend, RedisBackend};
pub use self::cache_store::CacheStore;
