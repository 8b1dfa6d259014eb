use crate::di::{DependenciesInject, DependenciesInjectDeps};
use crate::storage::FileStorage;
use anyhow::{Context, Result};
use shared::abstract_trait::{DynClock, DynHashing, DynJwtService};
use shared::config::{Config, ConnectionPool, Hashing, JwtConfig, RedisPool};
use shared::utils::SystemClock;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub clock: DynClock,
    pub storage: Arc<FileStorage>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let clock = Arc::new(SystemClock::new()) as DynClock;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let storage = Arc::new(FileStorage::new(&config.media_root, &config.base_url));

        let redis = RedisPool::new(&config.redis_url).context("failed to create redis pool")?;
        redis.ping().await.context("Failed to ping Redis server")?;

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            pool,
            redis,
            hash: hashing,
            jwt: jwt_config.clone(),
            clock: clock.clone(),
            storage: storage.clone(),
        });

        Ok(Self {
            di_container,
            jwt_config,
            clock,
            storage,
        })
    }
}
