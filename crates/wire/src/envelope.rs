// SPDX-License-Identifier: MIT

//! JSON-RPC envelope carried over the WebSocket frame.
//!
//! Requests and responses are correlated by `id`; events (`output`/`started`/`stopped`/
//! `updated`) are pushed to every connected client as untagged notifications — no `id`, no
//! response expected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub message: String,
}

impl RpcErrorObject {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn ok(id: u64, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    pub fn err(id: u64, message: impl Into<String>) -> Self {
        Self { id, result: None, error: Some(RpcErrorObject::new(message)) }
    }
}

/// A server-pushed event (`output`/`started`/`stopped`/`updated`); no `id`, unsolicited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcNotification {
    pub event: String,
    pub data: Value,
}

/// Build the quirky `{ "<service>": "ok" }` success body that `send`/`resize`/`erase` return,
/// preserved verbatim from the original wire contract (SPEC_FULL.md §4.5).
pub fn ok_response(service: &str) -> Value {
    serde_json::json!({ service: "ok" })
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
