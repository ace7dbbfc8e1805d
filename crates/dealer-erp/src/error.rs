use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErpError {
    /// Credentials or endpoint settings are missing.
    #[error("{0}")]
    Config(String),

    /// The ERP rejected the configured credentials.
    #[error("Authentication failed. Check your credentials.")]
    Auth,

    /// Transport, HTTP or RPC failure talking to the ERP.
    #[error("{0}")]
    Upstream(String),
}

impl ErpError {
    pub fn missing_credentials() -> Self {
        Self::Config("ODOO_USERNAME and ODOO_API_KEY environment variables not set".into())
    }
}

impl From<reqwest::Error> for ErpError {
    fn from(err: reqwest::Error) -> Self {
        ErpError::Upstream(format!("ERP request failed: {err}"))
    }
}
