use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CacheError;

/// Port of the Redis protocol endpoint behind a managed KV REST URL.
const MANAGED_REDIS_PORT: u16 = 6379;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// Redis when a URL is configured, otherwise disabled
    #[default]
    Auto,
    Redis,
    Memory,
    Disabled,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackendKind,

    /// Redis URL (`redis://`, `rediss://`) or a managed KV REST URL (`https://`)
    #[serde(default)]
    pub url: Option<String>,

    /// Access token for the managed KV service. The password is the part after
    /// the last `:`.
    #[serde(default)]
    pub token: Option<String>,

    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Connection timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_pool_size() -> usize {
    10
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::default(),
            url: None,
            token: None,
            pool_size: default_pool_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CacheConfig {
    fn configured_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The backend to build; never returns `Auto`.
    pub fn resolved_backend(&self) -> CacheBackendKind {
        match self.backend {
            CacheBackendKind::Auto if self.configured_url().is_some() => CacheBackendKind::Redis,
            CacheBackendKind::Auto => CacheBackendKind::Disabled,
            other => other,
        }
    }

    fn password(&self) -> Option<&str> {
        self.token
            .as_deref()
            .and_then(|t| t.rsplit(':').next())
            .filter(|p| !p.is_empty())
    }

    /// Build the Redis connection URL.
    ///
    /// - `redis://` / `rediss://` URLs are used as given; the token password is
    ///   filled in only when the URL carries none.
    /// - `https://` / `http://` KV REST URLs map to `rediss://default:<password>@<host>:6379`.
    pub fn redis_url(&self) -> Result<String, CacheError> {
        let raw = self
            .configured_url()
            .ok_or_else(|| CacheError::unavailable("cache url not configured"))?;
        let parsed =
            Url::parse(raw).map_err(|e| CacheError::unavailable(format!("invalid cache url: {e}")))?;

        let mut url = match parsed.scheme() {
            "redis" | "rediss" => parsed,
            "http" | "https" => {
                let host = parsed
                    .host_str()
                    .ok_or_else(|| CacheError::unavailable("cache url has no host"))?;
                let mut url = Url::parse(&format!("rediss://{host}:{MANAGED_REDIS_PORT}"))
                    .map_err(|e| CacheError::unavailable(format!("invalid cache url: {e}")))?;
                let _ = url.set_username("default");
                url
            }
            other => {
                return Err(CacheError::unavailable(format!(
                    "unsupported cache url scheme: {other}"
                )));
            }
        };

        if url.password().is_none() {
            if let Some(password) = self.password() {
                url.set_password(Some(password))
                    .map_err(|_| CacheError::unavailable("cache url cannot carry a password"))?;
            }
        }

        Ok(url.to_string())
    }
}
