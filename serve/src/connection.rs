//! Stdio session lifecycle: line loop and request dispatch.
//!
//! Requests other than `tools/call` are answered inline. Tool calls are
//! spawned so a slow `tsh` does not block `ping` or further calls; replies may
//! therefore arrive out of order and are matched by `id`.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinSet;

use super::app::{AppState, DEFAULT_PROTOCOL_VERSION};
use super::response::{
    send_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ResponseSender, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::tools::{handle_tools_call, handle_tools_list};
use crate::ServeError;

/// Reads requests until EOF or shutdown, then waits for in-flight tool calls.
/// `tx` is dropped on return, which lets the writer finish.
pub(crate) async fn handle_connection<R>(
    reader: R,
    tx: ResponseSender,
    state: Arc<AppState>,
) -> Result<(), ServeError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut calls = JoinSet::new();

    loop {
        let line = tokio::select! {
            biased;
            _ = state.shutdown.cancelled() => {
                tracing::info!("shutdown requested, closing stdio session");
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            tracing::debug!("input closed");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        dispatch(line, &tx, &state, &mut calls);

        while let Some(done) = calls.try_join_next() {
            if let Err(e) = done {
                tracing::warn!("tool call task failed: {}", e);
            }
        }
    }

    while let Some(done) = calls.join_next().await {
        if let Err(e) = done {
            tracing::warn!("tool call task failed: {}", e);
        }
    }
    Ok(())
}

fn dispatch(line: &str, tx: &ResponseSender, state: &Arc<AppState>, calls: &mut JoinSet<()>) {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("unparsable request line: {}", e);
            send_response(
                tx,
                JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("parse error: {}", e)),
                ),
            );
            return;
        }
    };
    let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            send_response(
                tx,
                JsonRpcResponse::error(
                    id_hint,
                    JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {}", e)),
                ),
            );
            return;
        }
    };

    let Some(id) = request.id else {
        handle_notification(&request.method);
        return;
    };
    if request.jsonrpc != "2.0" {
        send_response(
            tx,
            JsonRpcResponse::error(
                id,
                JsonRpcError::new(INVALID_REQUEST, "invalid json-rpc version"),
            ),
        );
        return;
    }

    tracing::debug!(method = %request.method, id = %id, "request");
    match request.method.as_str() {
        "initialize" => send_response(
            tx,
            JsonRpcResponse::result(id, initialize_result(state, request.params.as_ref())),
        ),
        "ping" => send_response(tx, JsonRpcResponse::result(id, json!({}))),
        "tools/list" => send_response(
            tx,
            JsonRpcResponse::result(id, handle_tools_list(&state.registry)),
        ),
        "tools/call" => {
            let state = Arc::clone(state);
            let tx = tx.clone();
            let params = request.params;
            calls.spawn(async move {
                let outcome = handle_tools_call(&state.registry, params).await;
                send_response(&tx, JsonRpcResponse::from_outcome(id, outcome));
            });
        }
        other => send_response(
            tx,
            JsonRpcResponse::error(
                id,
                JsonRpcError::new(METHOD_NOT_FOUND, format!("method not found: {}", other)),
            ),
        ),
    }
}

fn handle_notification(method: &str) {
    match method {
        "notifications/initialized" => tracing::info!("client initialized"),
        "notifications/cancelled" => tracing::debug!("client cancelled a request"),
        other => tracing::debug!("ignoring notification {}", other),
    }
}

/// Echoes the client's `protocolVersion` when it sends one.
fn initialize_result(state: &AppState, params: Option<&Value>) -> Value {
    let version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": state.server_name, "version": state.server_version }
    })
}
