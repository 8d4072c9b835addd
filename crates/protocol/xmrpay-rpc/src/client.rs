//! JSON-RPC 2.0 client with strict envelope validation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RpcError, RpcResult};
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Protocol version sent in every request.
pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
}

/// The `error` member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// Error code reported by the peer
    pub code: i64,
    /// Human-readable message
    pub message: String,
    /// Optional structured payload
    #[serde(default)]
    pub data: Option<Value>,
}

/// JSON-RPC 2.0 client over a [`Transport`].
///
/// Request ids are client-instance state: an atomic counter starting at 1,
/// strictly increasing, never reused, never shared across instances. One
/// `call` is exactly one request; there is no caching, retrying, or backoff
/// at this layer.
///
/// Validation pipeline for every response body:
/// 1. decode as JSON (`MalformedResponse` on failure),
/// 2. require a numeric `id` (`InvalidResponse`),
/// 3. require the id to echo ours (`IdMismatch`),
/// 4. fail on an `error` member, even when `result` is also present
///    (`Rpc`, carrying the originating method and params),
/// 5. hand back `result` verbatim.
pub struct RpcClient<T = HttpTransport> {
    transport: T,
    next_id: AtomicU64,
}

impl RpcClient<HttpTransport> {
    /// Client for a wallet-rpc endpoint URL (`http://host:port/json_rpc`).
    pub fn connect(url: impl Into<String>, config: &TransportConfig) -> RpcResult<Self> {
        Ok(Self::new(HttpTransport::new(url, config)?))
    }
}

impl<T: Transport> RpcClient<T> {
    /// Wrap an existing transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(0),
        }
    }

    /// Invoke `method` with `params` and return the `result` member.
    ///
    /// `params` is always a structured mapping (or `Value::Null` for
    /// parameterless methods); positional parameter arrays are not part of
    /// the wallet protocol.
    pub async fn call(&self, method: &str, params: Value) -> RpcResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let request = RequestEnvelope {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: &params,
            id,
        };
        let body = serde_json::to_vec(&request).map_err(|e| RpcError::encode(e.to_string()))?;

        debug!(method, id, "sending wallet RPC request");
        let raw = self.transport.send(body).await?;

        let mut decoded: Value = serde_json::from_slice(&raw).map_err(|e| {
            RpcError::malformed(format!("{e}: {}", String::from_utf8_lossy(&raw)))
        })?;

        let got = decoded
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| RpcError::invalid_response(format!("missing id: {decoded}")))?;
        if got != id {
            return Err(RpcError::IdMismatch { sent: id, got });
        }

        if let Some(error) = decoded.get("error") {
            let object: RpcErrorObject = serde_json::from_value(error.clone())
                .map_err(|e| RpcError::invalid_response(format!("unreadable error object: {e}")))?;
            warn!(
                method,
                code = object.code,
                message = %object.message,
                "wallet RPC returned an error"
            );
            return Err(RpcError::Rpc {
                code: object.code,
                message: object.message,
                data: object.data,
                method: method.to_string(),
                params,
            });
        }

        // Opaque to this layer; absent is delivered as null.
        Ok(decoded
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

impl<T> std::fmt::Debug for RpcClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("next_id", &self.next_id)
            .finish()
    }
}
