use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use dealer_cache::{CacheStore, create_cache_store};
use dealer_erp::{DealerSource, OdooClient};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig, handlers, middleware as app_middleware, service::DealerCacheService,
};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub dealers: Arc<DealerCacheService>,
}

impl AppState {
    pub fn new(dealers: DealerCacheService) -> Self {
        Self {
            dealers: Arc::new(dealers),
        }
    }

    /// Wire the ERP client, cache store and webhook secret from `cfg`.
    pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let source: Arc<dyn DealerSource> = Arc::new(OdooClient::new(cfg.erp.clone())?);
        if cfg.erp.credentials().is_none() {
            tracing::warn!("ERP credentials not configured; dealer requests will fail");
        }
        let cache: Arc<dyn CacheStore> = create_cache_store(&cfg.cache).await;
        Ok(Self::with_parts(source, cache, cfg))
    }

    pub fn with_parts(
        source: Arc<dyn DealerSource>,
        cache: Arc<dyn CacheStore>,
        cfg: &AppConfig,
    ) -> Self {
        Self::new(
            DealerCacheService::new(source, cache).with_webhook_secret(cfg.webhook.secret.clone()),
        )
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dealer_page))
        .route("/healthz", get(handlers::healthz))
        .route("/api/get-dealers", get(handlers::get_dealers))
        .route("/api/dealers", get(handlers::live_dealers))
        .route("/api/update-dealers", post(handlers::update_dealers))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(app_middleware::request_id))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = tracing::field::Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
}

pub struct DealerServer {
    addr: SocketAddr,
    app: Router,
}

pub struct ServerBuilder {
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.config = cfg;
        self
    }

    pub async fn build(self) -> anyhow::Result<DealerServer> {
        let state = AppState::from_config(&self.config).await?;
        Ok(DealerServer {
            addr: self.config.addr(),
            app: build_app(state),
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DealerServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use dealer_cache::MemoryCacheStore;
    use dealer_core::{DealerRecord, DealersPayload};
    use dealer_erp::ErpError;
    use tower::ServiceExt;

    struct StaticSource;

    #[async_trait]
    impl DealerSource for StaticSource {
        async fn fetch_dealers(&self) -> Result<DealersPayload, ErpError> {
            Ok(DealersPayload::new(vec![DealerRecord::named("Acme Tractor")]))
        }
    }

    fn app(secret: Option<&str>) -> Router {
        let mut cfg = AppConfig::default();
        cfg.webhook.secret = secret.map(str::to_string);
        build_app(AppState::with_parts(
            Arc::new(StaticSource),
            Arc::new(MemoryCacheStore::new()),
            &cfg,
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_dealers_route() {
        let request = Request::builder()
            .uri("/api/get-dealers")
            .body(Body::empty())
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["dealers"][0]["name"], "Acme Tractor");
    }

    #[tokio::test]
    async fn test_update_dealers_open_without_secret() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/update-dealers")
            .body(Body::empty())
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["dealers_count"], 1);
    }

    #[tokio::test]
    async fn test_update_dealers_requires_bearer() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/update-dealers")
            .header("authorization", "s3cret")
            .body(Body::empty())
            .unwrap();
        let response = app(Some("s3cret")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_plain_404() {
        let request = Request::builder()
            .uri("/favicon.ico")
            .body(Body::empty())
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "text/plain");
    }

    #[tokio::test]
    async fn test_healthz_carries_cors_headers() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache"], "memory");
    }
}
