//! JSON-RPC 2.0 envelopes and the single writer task that owns stdout.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ServeError;

pub(crate) const PARSE_ERROR: i64 = -32700;
pub(crate) const INVALID_REQUEST: i64 = -32600;
pub(crate) const METHOD_NOT_FOUND: i64 = -32601;
pub(crate) const INVALID_PARAMS: i64 = -32602;

/// Incoming request or notification. Notifications carry no `id`.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcRequest {
    #[serde(default)]
    pub(crate) jsonrpc: String,
    #[serde(default)]
    pub(crate) id: Option<Value>,
    pub(crate) method: String,
    #[serde(default)]
    pub(crate) params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct JsonRpcError {
    pub(crate) code: i64,
    pub(crate) message: String,
}

impl JsonRpcError {
    pub(crate) fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl JsonRpcResponse {
    pub(crate) fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub(crate) fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }

    pub(crate) fn from_outcome(id: Value, outcome: Result<Value, JsonRpcError>) -> Self {
        match outcome {
            Ok(result) => Self::result(id, result),
            Err(error) => Self::error(id, error),
        }
    }
}

pub(crate) type ResponseSender = mpsc::UnboundedSender<JsonRpcResponse>;

/// Serializes one response as a single line.
fn encode(response: &JsonRpcResponse) -> String {
    match serde_json::to_string(response) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("response serialization failed: {}", e);
            format!(
                r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":{},"message":"serialization error"}}}}"#,
                INVALID_REQUEST
            )
        }
    }
}

/// Spawns the writer. It exits once every sender is dropped, or on the first
/// write error.
pub(crate) fn spawn_writer<W>(
    mut writer: W,
) -> (ResponseSender, JoinHandle<Result<(), ServeError>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let handle = tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let mut line = encode(&response);
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
        }
        writer.shutdown().await?;
        Ok(())
    });
    (tx, handle)
}

/// Queues `response`. A closed writer is logged and otherwise ignored.
pub(crate) fn send_response(tx: &ResponseSender, response: JsonRpcResponse) {
    if tx.send(response).is_err() {
        tracing::warn!("writer closed, dropping response");
    }
}
