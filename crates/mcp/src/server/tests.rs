#![forbid(unsafe_code)]

use crate::{JsonRpcRequest, McpServer};
use ln_storage::{FamilyStore, StoreConfig};
use serde_json::{Value, json};

fn request(value: Value) -> JsonRpcRequest {
    serde_json::from_value(value).expect("request")
}

fn initialized_server() -> McpServer {
    let store = FamilyStore::open_in_memory(StoreConfig::default()).expect("store");
    let mut server = McpServer::new(store);
    server.handle(request(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" })));
    assert!(
        server
            .handle(request(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })))
            .is_none()
    );
    server
}

#[test]
fn requests_before_initialized_are_refused() {
    let store = FamilyStore::open_in_memory(StoreConfig::default()).expect("store");
    let mut server = McpServer::new(store);
    let resp = server
        .handle(request(json!({ "jsonrpc": "2.0", "id": 5, "method": "tools/list" })))
        .expect("response");
    assert_eq!(resp["error"]["code"], -32002);
    assert!(
        server
            .handle(request(json!({ "jsonrpc": "2.0", "method": "notifications/cancelled" })))
            .is_none()
    );
}

#[test]
fn unknown_method_and_unknown_tool() {
    let mut server = initialized_server();
    let resp = server
        .handle(request(json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" })))
        .expect("response");
    assert_eq!(resp["error"]["code"], -32601);

    let body = server.call_tool("family_teleport", json!({}));
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNKNOWN_TOOL");
}

#[test]
fn tool_call_wraps_envelope_as_text() {
    let mut server = initialized_server();
    let resp = server
        .handle(request(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "family_create", "arguments": { "name": "Roux" } }
        })))
        .expect("response");
    assert_eq!(resp["result"]["isError"], false);
    let text = resp["result"]["content"][0]["text"].as_str().expect("text");
    let body: Value = serde_json::from_str(text).expect("json");
    assert_eq!(body["intent"], "family_create");
    assert_eq!(body["result"]["family"]["name"], "Roux");
}

#[test]
fn non_object_arguments_are_invalid_input() {
    let mut server = initialized_server();
    let body = server.call_tool("family_list", json!([1, 2]));
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}
