use async_trait::async_trait;

use crate::{CacheError, CacheStore};

/// Stand-in used when no cache is configured or the configured one could not
/// be built. Every operation fails with `CacheError::Unavailable`.
#[derive(Debug, Clone)]
pub struct DisabledCacheStore {
    reason: String,
}

impl DisabledCacheStore {
    pub fn new() -> Self {
        Self::with_reason("cache not configured")
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for DisabledCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for DisabledCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::unavailable(self.reason.clone()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
        Err(CacheError::unavailable(self.reason.clone()))
    }

    fn ensure_enabled(&self) -> Result<(), CacheError> {
        Err(CacheError::unavailable(self.reason.clone()))
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
