//! Cache-aside access to the dealer list.
//!
//! ```text
//! read    → cache.get ─ hit ──────────────────────────→ payload (cached=true)
//!                     └ miss/unavailable → ERP fetch → cache.set → payload (cached=false)
//! refresh → secret check → ERP fetch → cache.set (always)
//! ```
//!
//! Concurrent misses are not deduplicated: each one fetches and writes the
//! same key, and the last write wins.

use std::sync::Arc;

use dealer_cache::{CacheError, CacheStore};
use dealer_core::{CACHE_KEY, DealersPayload};
use dealer_erp::{DealerSource, ErpError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Erp(#[from] ErpError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Failed to encode dealer list: {0}")]
    Encode(#[from] serde_json::Error),

    /// Webhook secret missing or wrong.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Result of a successful cache refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub dealers_count: usize,
}

pub struct DealerCacheService {
    source: Arc<dyn DealerSource>,
    cache: Arc<dyn CacheStore>,
    webhook_secret: Option<String>,
}

impl DealerCacheService {
    pub fn new(source: Arc<dyn DealerSource>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            source,
            cache,
            webhook_secret: None,
        }
    }

    /// Require `Authorization: Bearer <secret>` on refresh. Empty means no check.
    pub fn with_webhook_secret(mut self, secret: Option<String>) -> Self {
        self.webhook_secret = secret.filter(|s| !s.is_empty());
        self
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }

    /// Serve the dealer list from cache, filling it from the ERP on a miss.
    ///
    /// Cache failures never fail a read; ERP failures do, and leave the cache
    /// untouched.
    pub async fn read(&self) -> Result<DealersPayload, ServiceError> {
        match self.cache.get(CACHE_KEY).await {
            Ok(Some(raw)) => match DealersPayload::from_json(&raw) {
                Ok(payload) => {
                    tracing::info!(cache = "hit", count = payload.count(), "serving dealers");
                    return Ok(payload.mark_cached(true));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring undecodable cache entry");
                }
            },
            Ok(None) => tracing::debug!(key = CACHE_KEY, "cache miss"),
            Err(e) if self.cache.is_enabled() => {
                tracing::warn!(error = %e, "cache read failed, fetching from ERP");
            }
            Err(_) => {}
        }

        let payload = self.source.fetch_dealers().await?;

        if self.cache.is_enabled() {
            if let Err(e) = self.store(&payload).await {
                tracing::warn!(error = %e, "failed to populate dealer cache");
            }
        }

        tracing::info!(cache = "miss", count = payload.count(), "serving dealers");
        Ok(payload.mark_cached(false))
    }

    /// Fetch straight from the ERP; the cache is neither read nor written.
    pub async fn fetch_live(&self) -> Result<DealersPayload, ServiceError> {
        let payload = self.source.fetch_dealers().await?;
        Ok(payload.mark_cached(false))
    }

    /// Overwrite the cache with a fresh ERP fetch.
    ///
    /// Checks the bearer credential first; nothing else happens when it fails.
    pub async fn refresh(
        &self,
        authorization: Option<&str>,
    ) -> Result<RefreshOutcome, ServiceError> {
        self.authorize(authorization)?;

        self.cache.ensure_enabled()?;

        let payload = self.source.fetch_dealers().await?;
        self.store(&payload).await?;

        tracing::info!(
            count = payload.count(),
            backend = self.cache.backend_name(),
            "dealer cache refreshed"
        );
        Ok(RefreshOutcome {
            dealers_count: payload.count(),
        })
    }

    /// Check an `Authorization` header value against the webhook secret.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), ServiceError> {
        let Some(secret) = self.webhook_secret.as_deref() else {
            return Ok(());
        };
        let expected = format!("Bearer {secret}");
        if authorization == Some(expected.as_str()) {
            Ok(())
        } else {
            tracing::warn!(
                header_present = authorization.is_some(),
                "rejected cache refresh with bad webhook secret"
            );
            Err(ServiceError::Unauthorized)
        }
    }

    async fn store(&self, payload: &DealersPayload) -> Result<(), ServiceError> {
        let raw = payload.to_json()?;
        self.cache.set(CACHE_KEY, &raw).await?;
        Ok(())
    }
}
