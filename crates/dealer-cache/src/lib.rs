//! Cache stores for the dealer list.
//!
//! ## Backends
//!
//! - **Redis**: shared across instances, the production setup
//! - **Memory**: per-process DashMap, for local runs and tests
//! - **Disabled**: no cache configured; every call reports `CacheError::Unavailable`
//!
//! Entries never expire. A value stays until it is overwritten.

pub mod config;
pub mod disabled;
pub mod error;
pub mod memory;
pub mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::{CacheBackendKind, CacheConfig};
pub use disabled::DisabledCacheStore;
pub use error::CacheError;
pub use memory::MemoryCacheStore;
pub use redis_store::RedisCacheStore;

/// String key-value store.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` when the backing service cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` with no expiration, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// `Err` with the reason when no usable cache is configured at all.
    ///
    /// A reachable-but-failing backend is still enabled; its errors come from
    /// `get` and `set`.
    fn ensure_enabled(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.ensure_enabled().is_ok()
    }

    /// Short backend label for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Create the cache store selected by `config`.
///
/// A Redis pool that cannot be built (bad URL) yields a [`DisabledCacheStore`]
/// carrying the reason. A Redis server that is down at startup is only logged:
/// the pool reconnects on later calls.
pub async fn create_cache_store(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match config.resolved_backend() {
        CacheBackendKind::Disabled | CacheBackendKind::Auto => {
            tracing::info!("No cache configured, dealer reads go straight to the ERP");
            Arc::new(DisabledCacheStore::new())
        }
        CacheBackendKind::Memory => {
            tracing::info!("Using in-process memory cache");
            Arc::new(MemoryCacheStore::new())
        }
        CacheBackendKind::Redis => {
            let store = match RedisCacheStore::from_config(config) {
                Ok(store) => store,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create Redis pool, cache disabled");
                    return Arc::new(DisabledCacheStore::with_reason(e.to_string()));
                }
            };

            match store.ping().await {
                Ok(()) => tracing::info!("Connected to Redis"),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Redis not reachable at startup; reads fall back to the ERP until it is"
                ),
            }
            Arc::new(store)
        }
    }
}
