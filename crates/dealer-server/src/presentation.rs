//! JSON and HTML renderings of the dealer list.
//!
//! Rendering never fails: a missing dealer field shows `N/A` (or nothing for
//! address lines), and every value is HTML-escaped.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use dealer_core::{DealerRecord, DealersPayload};
use serde_json::json;

const PLACEHOLDER: &str = "N/A";

const PAGE_STYLES: &str = r#"
body {
    font-family: Arial, sans-serif;
    max-width: 1000px;
    margin: 50px auto;
    padding: 20px;
    background: #f9f9f9;
}
h1 { color: #0070f3; }
.success {
    background: #d4edda;
    border-left: 4px solid #28a745;
    padding: 15px;
    border-radius: 5px;
    margin: 20px 0;
}
.error {
    background: #fee;
    border-left: 4px solid #f00;
    padding: 15px;
    border-radius: 5px;
}
.stats {
    background: #e3f2fd;
    padding: 15px;
    border-radius: 5px;
    margin: 20px 0;
}
.dealer-card {
    background: white;
    padding: 20px;
    margin: 15px 0;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    border-left: 4px solid #0070f3;
}
.dealer-card h3 {
    margin-top: 0;
    color: #333;
}
.dealer-info p {
    margin: 8px 0;
    color: #666;
}
"#;

/// Serialize a payload for the JSON endpoints.
pub fn to_json(payload: &DealersPayload) -> String {
    payload.to_json().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize dealer payload");
        json!({ "error": "Failed to serialize dealer list" }).to_string()
    })
}

/// Full HTML page with one card per dealer.
pub fn to_html(payload: &DealersPayload) -> String {
    let mut content = String::new();
    content.push_str("<h1>Dealer Locations</h1>\n");
    content.push_str("<div class=\"success\">Dealer list loaded successfully.</div>\n");

    content.push_str("<div class=\"stats\"><strong>Number of dealers found:</strong> ");
    content.push_str(&payload.count().to_string());
    content.push_str("</div>\n");

    content.push_str("<div class=\"stats\"><strong>Source:</strong> ");
    content.push_str(if payload.is_cached() { "cache" } else { "ERP (live)" });
    content.push_str("</div>\n");

    content.push_str("<div class=\"dealers\">\n");
    for dealer in payload.dealers() {
        content.push_str(&dealer_card(dealer));
    }
    content.push_str("</div>");

    html_page("Dealer Locations", &content)
}

/// Error page body; `message` is escaped.
pub fn error_html(message: &str) -> String {
    let mut content = String::new();
    content.push_str("<h1>Dealer Locations</h1>\n");
    content.push_str("<div class=\"error\"><strong>Error:</strong> ");
    content.push_str(&html_escape(message));
    content.push_str("</div>");
    html_page("Dealer Locations - Error", &content)
}

fn dealer_card(dealer: &DealerRecord) -> String {
    let shown = |v: Option<&str>| v.map_or_else(|| PLACEHOLDER.to_string(), html_escape);
    let blank = |v: Option<&str>| v.map(html_escape).unwrap_or_default();
    let coordinate = |v: Option<f64>| v.map_or_else(|| PLACEHOLDER.to_string(), |c| c.to_string());

    let name = shown(dealer.name());
    let street = blank(dealer.street());
    let street2 = blank(dealer.street2());
    let city = shown(dealer.city());
    let state = shown(dealer.state_label());
    let zip = blank(dealer.zip());
    let country = shown(dealer.country_label());
    let phone = shown(dealer.phone());
    let email = shown(dealer.email());

    format!(
        r#"<div class="dealer-card">
<h3>{name}</h3>
<div class="dealer-info">
<p><strong>Address:</strong> {street} {street2}</p>
<p><strong>City:</strong> {city}, {state} {zip}</p>
<p><strong>Country:</strong> {country}</p>
<p><strong>Phone:</strong> {phone}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Coordinates:</strong> Lat: {lat}, Lng: {lng}</p>
</div>
</div>
"#,
        lat = coordinate(dealer.latitude()),
        lng = coordinate(dealer.longitude()),
    )
}

fn html_page(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(title),
        PAGE_STYLES,
        content
    )
}

/// Simple HTML escaping to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON response carrying the website's CORS headers.
pub fn json_response(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

pub fn html_response(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}
