use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ERP_URL: &str = "https://mid-city-engineering.odoo.com";
pub const DEFAULT_ERP_DATABASE: &str = "mid-city-engineering";

/// Connection settings for the Odoo instance.
///
/// Credentials are optional here on purpose: a deployment without them still
/// starts, and every dealer request reports the missing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// HTTP request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_url() -> String {
    DEFAULT_ERP_URL.into()
}
fn default_database() -> String {
    DEFAULT_ERP_DATABASE.into()
}
fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            database: default_database(),
            username: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ErpConfig {
    /// Returns `(username, api_key)` when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let api_key = self.api_key.as_deref().filter(|s| !s.is_empty())?;
        Some((username, api_key))
    }

    pub fn rpc_endpoint(&self) -> String {
        format!("{}/jsonrpc", self.url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
