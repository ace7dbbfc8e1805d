use dealer_cache::{CacheBackendKind, CacheConfig};
use dealer_erp::ErpConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Upstream ERP connection
    #[serde(default)]
    pub erp: ErpConfig,
    /// Dealer cache backend
    #[serde(default)]
    pub cache: CacheConfig,
    /// Cache refresh webhook
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.erp.url.trim().is_empty() {
            return Err("erp.url must not be empty".into());
        }
        if self.erp.database.trim().is_empty() {
            return Err("erp.database must not be empty".into());
        }
        if self.cache.backend == CacheBackendKind::Redis
            && self.cache.url.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err("cache.backend=redis requires cache.url".into());
        }
        if self.cache.pool_size == 0 {
            return Err("cache.pool_size must be > 0".into());
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Shared secret for `POST /api/update-dealers`.
///
/// When unset or empty the endpoint accepts unauthenticated calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookConfig {
    #[serde(default)]
    pub secret: Option<String>,
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::env;
    use std::path::PathBuf;

    pub const DEFAULT_CONFIG_FILE: &str = "dealers.toml";

    /// Environment variables the hosting platform already provides, mapped to
    /// config keys. They take precedence over the file and `DEALERS__*`.
    pub const PLATFORM_ENV: &[(&str, &str)] = &[
        ("ODOO_USERNAME", "erp.username"),
        ("ODOO_API_KEY", "erp.api_key"),
        ("KV_REST_API_URL", "cache.url"),
        ("KV_REST_API_TOKEN", "cache.token"),
        ("WEBHOOK_SECRET", "webhook.secret"),
    ];

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        // Environment variable overrides, e.g., DEALERS__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("DEALERS")
                .try_parsing(true)
                .separator("__"),
        );
        for (var, key) in PLATFORM_ENV {
            let value = env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder
                .set_override_option(*key, value)
                .map_err(|e| format!("config override error for {var}: {e}"))?;
        }
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
