// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn ok_response_keys_by_service_name() {
    let value = ok_response("echo");
    assert_eq!(value, serde_json::json!({ "echo": "ok" }));
}

#[test]
fn error_response_omits_result_field() {
    let resp = RpcResponse::err(1, "target service not exists.");
    let json = serde_json::to_value(&resp).unwrap();
    assert!(json.get("result").is_none());
    assert_eq!(json["error"]["message"], "target service not exists.");
}

#[test]
fn ok_response_omits_error_field() {
    let resp = RpcResponse::ok(1, serde_json::json!({"a": 1}));
    let json = serde_json::to_value(&resp).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["result"]["a"], 1);
}

#[test]
fn request_params_default_to_null_when_absent() {
    let req: RpcRequest = serde_json::from_str(r#"{"id": 1, "method": "ping"}"#).unwrap();
    assert!(req.params.is_null());
}
