use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Echo the caller's `x-request-id` on the response, minting a UUID when the
/// request has none. The value is also stored in the request extensions.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let name = HeaderName::from_static(REQUEST_ID_HEADER);

    let id = req
        .headers()
        .get(&name)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    let Some(id) = id else {
        return next.run(req).await;
    };

    req.extensions_mut().insert(id.clone());
    let mut res = next.run(req).await;
    res.headers_mut().insert(name, id);
    res
}
