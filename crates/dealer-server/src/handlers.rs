use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::{ApiError, PageError};
use crate::presentation;
use crate::server::AppState;

/// `GET /api/get-dealers`: cache-aside read.
pub async fn get_dealers(State(state): State<AppState>) -> Result<Response, ApiError> {
    let payload = state.dealers.read().await?;
    Ok(presentation::json_response(
        StatusCode::OK,
        presentation::to_json(&payload),
    ))
}

/// `GET /api/dealers`: always queries the ERP.
pub async fn live_dealers(State(state): State<AppState>) -> Result<Response, ApiError> {
    let payload = state.dealers.fetch_live().await?;
    Ok(presentation::json_response(
        StatusCode::OK,
        presentation::to_json(&payload),
    ))
}

/// `POST /api/update-dealers`: webhook that refreshes the cache.
pub async fn update_dealers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let outcome = state.dealers.refresh(authorization).await?;

    let body = json!({
        "success": true,
        "message": "Cache refreshed successfully",
        "dealers_count": outcome.dealers_count,
    });
    Ok(presentation::json_response(StatusCode::OK, body.to_string()))
}

/// `GET /`: dealer page.
pub async fn dealer_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let payload = state.dealers.read().await?;
    Ok(presentation::html_response(
        StatusCode::OK,
        presentation::to_html(&payload),
    ))
}

pub async fn healthz(State(state): State<AppState>) -> Response {
    let body = json!({
        "status": "ok",
        "cache": state.dealers.cache_backend(),
    });
    presentation::json_response(StatusCode::OK, body.to_string())
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not Found",
    )
}
