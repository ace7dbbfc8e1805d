use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The backing service is unreachable or not configured.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

impl CacheError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        CacheError::Unavailable(format!("Redis connection failed: {err}"))
    }
}
