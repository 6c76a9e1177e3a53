//! Newline-delimited JSON-RPC 2.0 over stdin/stdout.
//!
//! The methods an MCP host actually sends: `initialize`, `tools/list`,
//! `tools/call`, and `ping`. Notifications (no id) get no reply. Stdout
//! carries protocol frames only; all logging goes to file or stderr.

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use jh_history_tools::HistoryClient;

use crate::dispatch::{DispatchError, dispatch};
use crate::registry::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

fn result_response(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn error_response(id: Value, code: i64, message: String) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}

fn tools_list(registry: &ToolRegistry) -> Value {
    let tools: Vec<Value> = registry
        .list_tools()
        .into_iter()
        .map(|info| {
            json!({
                "name": info.name,
                "description": info.description,
                "inputSchema": info.schema,
            })
        })
        .collect();
    json!({"tools": tools})
}

/// Handle one decoded request. `None` means no reply (a notification).
pub async fn handle_request(
    registry: &ToolRegistry,
    client: &dyn HistoryClient,
    request: Value,
) -> Option<Value> {
    let request: JsonRpcRequest = match serde_json::from_value(request) {
        Ok(r) => r,
        Err(e) => {
            return Some(error_response(
                Value::Null,
                PARSE_ERROR,
                format!("malformed request: {e}"),
            ));
        }
    };

    // Notifications carry no id and expect no response.
    let Some(id) = request.id else {
        return None;
    };

    match request.method.as_str() {
        "initialize" => Some(result_response(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": "jobhistory-mcp",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )),
        "ping" => Some(result_response(id, json!({}))),
        "tools/list" => Some(result_response(id, tools_list(registry))),
        "tools/call" => {
            let tool_name = request.params["name"].as_str().unwrap_or_default();
            let args = request.params.get("arguments").cloned().unwrap_or(json!({}));
            match dispatch(registry, client, tool_name, args).await {
                Ok(text) => Some(result_response(
                    id,
                    json!({
                        "content": [{"type": "text", "text": text}],
                        "isError": false,
                    }),
                )),
                Err(e @ DispatchError::UnknownTool(_)) => {
                    Some(error_response(id, METHOD_NOT_FOUND, e.to_string()))
                }
                Err(e @ DispatchError::InvalidInput(_)) => {
                    Some(error_response(id, INVALID_PARAMS, e.to_string()))
                }
            }
        }
        other => Some(error_response(
            id,
            METHOD_NOT_FOUND,
            format!("method not found: {other}"),
        )),
    }
}

/// Serve requests until stdin closes.
pub async fn run(registry: &ToolRegistry, client: &dyn HistoryClient) -> anyhow::Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            tracing::info!("stdin closed, shutting down");
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(trimmed) {
            Ok(request) => handle_request(registry, client, request).await,
            Err(e) => Some(error_response(
                Value::Null,
                PARSE_ERROR,
                format!("invalid JSON: {e}"),
            )),
        };

        if let Some(response) = response {
            let mut frame = serde_json::to_vec(&response)?;
            frame.push(b'\n');
            stdout.write_all(&frame).await?;
            stdout.flush().await?;
        }
    }
}
