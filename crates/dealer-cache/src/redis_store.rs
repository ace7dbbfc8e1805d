//! Redis-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Pool, Runtime};
use redis::AsyncCommands;

use crate::{CacheConfig, CacheError, CacheStore};

/// Cache store on a deadpool-managed Redis connection pool.
///
/// Values are written with plain `SET` (no TTL). A failed connection or
/// command surfaces as `CacheError::Unavailable`; retrying is up to the caller.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build the pool described by `config`. Does not connect.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let url = config.redis_url()?;
        let timeout = Duration::from_millis(config.timeout_ms);

        let mut pool_config = deadpool_redis::PoolConfig::new(config.pool_size);
        pool_config.timeouts.wait = Some(timeout);
        pool_config.timeouts.create = Some(timeout);
        pool_config.timeouts.recycle = Some(timeout);

        let mut redis_config = deadpool_redis::Config::from_url(url);
        redis_config.pool = Some(pool_config);

        let pool = redis_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::unavailable(format!("failed to create Redis pool: {e}")))?;

        Ok(Self::new(pool))
    }

    /// Round-trip a `PING` to check reachability.
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.pool.get().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to get Redis connection");
        })?;
        let value: Option<String> = conn.get(key).await.inspect_err(|e| {
            tracing::warn!(key = %key, error = %e, "Redis GET error");
        })?;
        tracing::debug!(key = %key, hit = value.is_some(), "redis cache get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to get Redis connection");
        })?;
        conn.set::<_, _, ()>(key, value).await.inspect_err(|e| {
            tracing::warn!(key = %key, error = %e, "Redis SET error");
        })?;
        tracing::debug!(key = %key, bytes = value.len(), "redis cache set");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
