mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.transport {
        cli::Transport::Stdio => stdio::run_stdio(global).await,
        cli::Transport::Sse(options) => sse::run_sse(options, global).await,
    }
}

/// Handle one raw JSON-RPC message as read from a transport
pub async fn handle_request(request_str: &str, global: &crate::Global) -> JsonRpcResponse {
    match serde_json::from_str(request_str) {
        Ok(value) => handle_message(value, global).await,
        Err(e) => JsonRpcResponse::failure(
            None,
            JsonRpcError::new(JsonRpcError::PARSE_ERROR, format!("Parse error: {e}")),
        ),
    }
}

/// Handle one already-decoded JSON-RPC message
pub async fn handle_message(
    message: serde_json::Value,
    global: &crate::Global,
) -> JsonRpcResponse {
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            return JsonRpcResponse::failure(
                None,
                JsonRpcError::new(
                    JsonRpcError::INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ),
            );
        }
    };

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError::new(
            JsonRpcError::METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse::failure(request.id, error),
    }
}

impl JsonRpcResponse {
    fn failure(id: Option<serde_json::Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn global() -> crate::Global {
        crate::Global {
            base_url: None,
            verbose: false,
        }
    }

    async fn call(request: serde_json::Value) -> serde_json::Value {
        let response = handle_request(&request.to_string(), &global()).await;
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_handle_request_parse_error() {
        let response = handle_request("{not json", &global()).await;
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["error"]["code"], -32700);
        assert_eq!(value["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_handle_message_rejects_non_requests() {
        let response = handle_message(json!({"jsonrpc": "2.0", "id": 4}), &global()).await;
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_handle_request_unknown_method() {
        let value = call(json!({"jsonrpc": "2.0", "id": 7, "method": "nope"})).await;

        assert_eq!(value["id"], 7);
        assert_eq!(value["error"]["code"], -32601);
        assert!(value.get("result").is_none());
    }

    #[tokio::test]
    async fn test_handle_request_initialize() {
        let value = call(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})).await;

        assert_eq!(value["result"]["serverInfo"]["name"], "jiratools");
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_handle_request_lists_tools() {
        let value = call(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

        let names: Vec<&str> = value["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();

        assert!(names.contains(&"adf_render"));
        assert!(names.contains(&"jira_get"));
    }

    #[tokio::test]
    async fn test_handle_request_unknown_tool() {
        let value = call(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "missing_tool"}
        }))
        .await;

        assert_eq!(value["error"]["code"], -32602);
    }
}
