//! `OdooClient` against a wiremock Odoo JSON-RPC endpoint.

use dealer_erp::{DealerSource, ErpConfig, ErpError, OdooClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ErpConfig {
    ErpConfig {
        url: server.uri(),
        database: "test-db".into(),
        username: Some("api@example.com".into()),
        api_key: Some("secret-key".into()),
        timeout_ms: 5_000,
    }
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

async fn mount_authenticate(server: &MockServer, uid: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "params": {
                "service": "common",
                "method": "authenticate",
                "args": ["test-db", "api@example.com", "secret-key", {}]
            }
        })))
        .respond_with(rpc_result(uid))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_dealers_authenticates_then_searches() {
    let server = MockServer::start().await;
    mount_authenticate(&server, json!(12)).await;

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "params": {
                "service": "object",
                "method": "execute_kw",
                "args": [
                    "test-db", 12, "secret-key", "res.partner", "search_read",
                    [[["category_id", "=", "Dealer"]]]
                ]
            }
        })))
        .respond_with(rpc_result(json!([
            {
                "id": 1,
                "name": "Acme Tractor",
                "city": "Omaha",
                "state_id": [27, "Nebraska (US)"],
                "country_id": [233, "United States"],
                "street": "1 Main St",
                "street2": false,
                "zip": "68102",
                "phone": "+1 402 555 0100",
                "email": false,
                "partner_latitude": 41.25,
                "partner_longitude": -95.93,
                "x_latitude": false,
                "x_longitude": false
            },
            { "id": 2, "name": "Delta Supply", "city": false }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OdooClient::new(config_for(&server)).unwrap();
    let payload = client.fetch_dealers().await.unwrap();

    assert!(payload.success());
    assert_eq!(payload.count(), 2);
    assert!(!payload.is_cached());
    let first = &payload.dealers()[0];
    assert_eq!(first.name(), Some("Acme Tractor"));
    assert_eq!(first.state_label(), Some("Nebraska (US)"));
    assert_eq!(first.latitude(), Some(41.25));
    assert_eq!(first.get("street2"), Some(&json!(false)));
    assert!(payload.dealers()[1].city().is_none());
}

#[tokio::test]
async fn rejected_credentials_map_to_auth_error() {
    let server = MockServer::start().await;
    mount_authenticate(&server, json!(false)).await;

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({ "params": { "service": "object" } })))
        .respond_with(rpc_result(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = OdooClient::new(config_for(&server)).unwrap();
    let err = client.fetch_dealers().await.unwrap_err();
    assert!(matches!(err, ErpError::Auth));
}

#[tokio::test]
async fn missing_credentials_make_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!(1)))
        .expect(0)
        .mount(&server)
        .await;

    let config = ErpConfig {
        api_key: None,
        ..config_for(&server)
    };
    let client = OdooClient::new(config).unwrap();
    let err = client.fetch_dealers().await.unwrap_err();

    assert!(matches!(err, ErpError::Config(_)));
    assert!(err.to_string().contains("ODOO_API_KEY"));
}

#[tokio::test]
async fn rpc_fault_is_passed_through() {
    let server = MockServer::start().await;
    mount_authenticate(&server, json!(12)).await;

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({ "params": { "service": "object" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {
                    "name": "builtins.ValueError",
                    "message": "Invalid field 'x_latitude' on model 'res.partner'"
                }
            }
        })))
        .mount(&server)
        .await;

    let client = OdooClient::new(config_for(&server)).unwrap();
    let err = client.fetch_dealers().await.unwrap_err();

    match err {
        ErpError::Upstream(msg) => {
            assert!(msg.contains("Invalid field 'x_latitude'"), "got: {msg}");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = OdooClient::new(config_for(&server)).unwrap();
    let err = client.fetch_dealers().await.unwrap_err();

    match err {
        ErpError::Upstream(msg) => assert!(msg.contains("502"), "got: {msg}"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}
