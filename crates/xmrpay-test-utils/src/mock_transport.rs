//! Mock implementation of the `Transport` trait for testing.
//!
//! Replays scripted JSON-RPC replies and records every request envelope so
//! tests can assert on ids, methods, and params.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{json, Value};
use xmrpay_rpc::transport::recognized_status_reason;
use xmrpay_rpc::{RpcError, RpcResult, Transport};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Success envelope echoing the request id, carrying this `result`.
    Result(Value),
    /// Error envelope echoing the request id.
    RpcError {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
    /// These exact bytes, whatever the request said.
    Raw(Vec<u8>),
    /// Fail with a connect error.
    ConnectFailure(String),
    /// Fail with a recognized HTTP status.
    HttpStatus(u16),
    /// Fail with a generic transport error.
    TransportFailure(String),
}

struct MockTransportInner {
    /// Scripted replies, consumed front to back.
    script: VecDeque<MockReply>,
    /// Reply used once the script is exhausted.
    fallback: MockReply,
    /// Every request envelope received, decoded.
    requests: Vec<Value>,
}

/// A scriptable [`Transport`] that records every request envelope.
///
/// Cheap to clone; all clones share the same state, so a test can keep a
/// handle for assertions after moving another into the client.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<RwLock<MockTransportInner>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a transport that answers `null` results until scripted
    /// otherwise.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockTransportInner {
                script: VecDeque::new(),
                fallback: MockReply::Result(Value::Null),
                requests: Vec::new(),
            })),
        }
    }

    /// Replace the reply used once the script is exhausted.
    pub fn with_fallback(self, reply: MockReply) -> Self {
        self.inner.write().unwrap().fallback = reply;
        self
    }

    /// Append one scripted reply.
    pub fn push(&self, reply: MockReply) {
        self.inner.write().unwrap().script.push_back(reply);
    }

    /// Append a scripted success result.
    pub fn push_result(&self, result: Value) {
        self.push(MockReply::Result(result));
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Every request envelope received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.inner.read().unwrap().requests.clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.inner.read().unwrap().requests.len()
    }

    /// The `id` of every request, in send order.
    pub fn sent_ids(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_u64))
            .collect()
    }

    /// The `method` of every request, in send order.
    pub fn sent_methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.get("method").and_then(Value::as_str).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, body: Vec<u8>) -> RpcResult<Vec<u8>> {
        let envelope: Value = serde_json::from_slice(&body).expect("request body is JSON");

        let reply = {
            let mut inner = self.inner.write().unwrap();
            inner.requests.push(envelope.clone());
            inner
                .script
                .pop_front()
                .unwrap_or_else(|| inner.fallback.clone())
        };

        let id = envelope.get("id").cloned().unwrap_or(Value::Null);
        match reply {
            MockReply::Result(result) => Ok(serde_json::to_vec(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result,
            }))
            .expect("envelope serializes")),
            MockReply::RpcError { code, message } => Ok(serde_json::to_vec(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": code, "message": message},
            }))
            .expect("envelope serializes")),
            MockReply::Raw(bytes) => Ok(bytes),
            MockReply::ConnectFailure(detail) => {
                Err(RpcError::connect("http://127.0.0.1:18083/json_rpc", detail))
            }
            MockReply::HttpStatus(code) => Err(RpcError::HttpStatus {
                code,
                reason: recognized_status_reason(code).unwrap_or("Error"),
            }),
            MockReply::TransportFailure(detail) => Err(RpcError::transport(detail)),
        }
    }
}
