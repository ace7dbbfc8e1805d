pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod presentation;
pub mod server;
pub mod service;

pub use config::{AppConfig, LoggingConfig, ServerConfig, WebhookConfig};
pub use error::{ApiError, PageError};
pub use observability::init_tracing;
pub use server::{AppState, DealerServer, ServerBuilder, build_app};
pub use service::{DealerCacheService, RefreshOutcome, ServiceError};
