use anyhow::{Context, Result};
use deadpool_redis::{Pool, Runtime};
use tracing::info;

#[derive(Clone)]
pub struct RedisPool {
    pub pool: Pool,
}

impl RedisPool {
    pub fn new(redis_url: &str) -> Result<Self> {
        info!("Creating redis connection pool");

        let pool = deadpool_redis::Config::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis connection pool")?;

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.get().await?;

        info!("Pinging redis");
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Pinged redis");

        Ok(())
    }
}
