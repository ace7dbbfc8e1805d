use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dealer_core::{DealerRecord, DealersPayload};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::DealerSource;
use crate::config::ErpConfig;
use crate::error::ErpError;
use crate::rpc::{RpcRequest, RpcResponse};

pub const DEALER_MODEL: &str = "res.partner";
pub const DEALER_CATEGORY: &str = "Dealer";
pub const DEALER_FIELDS: &[&str] = &[
    "name",
    "partner_latitude",
    "partner_longitude",
    "x_latitude",
    "x_longitude",
    "street",
    "street2",
    "city",
    "state_id",
    "zip",
    "country_id",
    "phone",
    "email",
];

/// JSON-RPC client for an Odoo instance.
///
/// Each fetch authenticates and then runs one `search_read`; no session is
/// kept between calls.
pub struct OdooClient {
    http: Client,
    config: ErpConfig,
    next_id: AtomicU64,
}

impl OdooClient {
    pub fn new(config: ErpConfig) -> Result<Self, ErpError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ErpError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: Client, config: ErpConfig) -> Self {
        Self {
            http,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    /// Resolve the user id for the configured credentials.
    pub async fn authenticate(&self) -> Result<i64, ErpError> {
        let (username, api_key) = self
            .config
            .credentials()
            .ok_or_else(ErpError::missing_credentials)?;

        let result: Value = self
            .call(
                "common",
                "authenticate",
                json!([self.config.database, username, api_key, {}]),
            )
            .await?;

        match result.as_i64() {
            Some(uid) if uid > 0 => {
                tracing::debug!(uid, "ERP authentication succeeded");
                Ok(uid)
            }
            _ => {
                tracing::warn!(username, "ERP rejected credentials");
                Err(ErpError::Auth)
            }
        }
    }

    /// Run the dealer `search_read` as `uid`.
    pub async fn search_dealers(&self, uid: i64) -> Result<Vec<DealerRecord>, ErpError> {
        let (_, api_key) = self
            .config
            .credentials()
            .ok_or_else(ErpError::missing_credentials)?;

        self.call(
            "object",
            "execute_kw",
            json!([
                self.config.database,
                uid,
                api_key,
                DEALER_MODEL,
                "search_read",
                [[["category_id", "=", DEALER_CATEGORY]]],
                { "fields": DEALER_FIELDS }
            ]),
        )
        .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        service: &str,
        method: &str,
        args: Value,
    ) -> Result<T, ErpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::call(id, service, method, args);

        let response = self
            .http
            .post(self.config.rpc_endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ErpError::Upstream(format!(
                "ERP returned HTTP {status} for {service}.{method}"
            )));
        }

        let envelope: RpcResponse = response.json().await?;
        if let Some(fault) = envelope.error {
            return Err(ErpError::Upstream(fault.describe()));
        }

        let result = envelope.result.ok_or_else(|| {
            ErpError::Upstream(format!("ERP response to {service}.{method} has no result"))
        })?;

        serde_json::from_value(result).map_err(|e| {
            ErpError::Upstream(format!("Unexpected ERP response to {service}.{method}: {e}"))
        })
    }
}

#[async_trait]
impl DealerSource for OdooClient {
    async fn fetch_dealers(&self) -> Result<DealersPayload, ErpError> {
        let uid = self.authenticate().await?;
        let dealers = self.search_dealers(uid).await?;
        tracing::info!(count = dealers.len(), "fetched dealers from ERP");
        Ok(DealersPayload::new(dealers))
    }
}
