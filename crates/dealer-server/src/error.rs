//! HTTP error responses.
//!
//! The JSON endpoints answer `{"error": "<message>"}` with the CORS headers;
//! the HTML page answers an error page. Both use the same status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dealer_cache::CacheError;
use dealer_erp::ErpError;
use serde_json::json;

use crate::presentation;
use crate::service::ServiceError;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Erp(ErpError::Auth) | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Erp(ErpError::Config(_)) | Self::Erp(ErpError::Upstream(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Cache(CacheError::Unavailable(_)) | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "dealer request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "dealer request rejected");
        }
    }
}

/// Error returned by the JSON endpoints.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.log();
        let body = json!({ "error": self.0.to_string() }).to_string();
        presentation::json_response(self.0.status_code(), body)
    }
}

/// Error returned by the HTML page.
#[derive(Debug)]
pub struct PageError(pub ServiceError);

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.log();
        presentation::html_response(
            self.0.status_code(),
            presentation::error_html(&self.0.to_string()),
        )
    }
}
