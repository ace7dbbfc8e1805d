use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{CacheError, CacheStore};

/// Single-process cache backed by a DashMap.
#[derive(Clone, Default)]
pub struct MemoryCacheStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value = self.entries.get(key).map(|entry| entry.value().clone());
        tracing::debug!(key = %key, hit = value.is_some(), "memory cache get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        tracing::debug!(key = %key, bytes = value.len(), "memory cache set");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
