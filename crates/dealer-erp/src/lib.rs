//! Upstream ERP access for the dealer locator.
//!
//! [`OdooClient`] authenticates against an Odoo instance over JSON-RPC and runs
//! the fixed dealer search. Callers depend on the [`DealerSource`] trait so the
//! cache layer can be exercised without a live ERP.

pub mod client;
pub mod config;
pub mod error;
mod rpc;

use async_trait::async_trait;
use dealer_core::DealersPayload;

pub use client::{DEALER_CATEGORY, DEALER_FIELDS, DEALER_MODEL, OdooClient};
pub use config::ErpConfig;
pub use error::ErpError;

/// Source of the authoritative dealer list.
#[async_trait]
pub trait DealerSource: Send + Sync {
    /// Fetch the full dealer list.
    ///
    /// # Errors
    ///
    /// Returns `ErpError::Config` when credentials are missing (no request is
    /// made), `ErpError::Auth` when the ERP rejects them, and
    /// `ErpError::Upstream` for any transport or protocol failure.
    async fn fetch_dealers(&self) -> Result<DealersPayload, ErpError>;
}
