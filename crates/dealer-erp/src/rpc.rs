//! JSON-RPC 2.0 envelope used by Odoo's `/jsonrpc` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Value,
}

impl<'a> RpcRequest<'a> {
    pub(crate) fn call(id: u64, service: &'a str, method: &'a str, args: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params: RpcParams {
                service,
                method,
                args,
            },
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcFault {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<RpcFaultData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcFaultData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RpcFault {
    /// The server-side exception message when present, else the envelope message.
    pub(crate) fn describe(&self) -> String {
        let detail = self.data.as_ref().and_then(|d| d.message.as_deref());
        let name = self.data.as_ref().and_then(|d| d.name.as_deref());
        match (detail, name) {
            (Some(detail), Some(name)) => format!("{name}: {detail}"),
            (Some(detail), None) => detail.to_string(),
            _ => format!("{} (code {})", self.message, self.code),
        }
    }
}
