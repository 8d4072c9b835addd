//! Error types for the RPC layer.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Errors raised by the transport and JSON-RPC protocol layers.
///
/// Every failure is surfaced to the immediate caller; nothing is retried or
/// swallowed inside this crate. Retry policy belongs to whoever polls.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The socket or TLS handshake to the endpoint could not be established.
    #[error("unable to connect to {url}: {detail}")]
    Connect {
        /// The endpoint that refused us
        url: String,
        /// Underlying error text
        detail: String,
    },

    /// The peer answered with a recognized error status.
    #[error("response HTTP error: {code} {reason}")]
    HttpStatus {
        /// Status code (one of the recognized set, see `transport`)
        code: u16,
        /// Standard reason phrase for the code
        reason: &'static str,
    },

    /// Any other low-level transport failure (read timeout, broken pipe, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request envelope could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The response body was not valid JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The response parsed but lacks the shape of a JSON-RPC envelope.
    #[error("invalid response data structure: {0}")]
    InvalidResponse(String),

    /// The response id does not echo the request id.
    ///
    /// Guards against request/response desynchronization on a connection the
    /// transport may reuse or pipeline.
    #[error("request id {sent} differs from response id {got}")]
    IdMismatch {
        /// Id we sent
        sent: u64,
        /// Id the peer echoed
        got: u64,
    },

    /// The wallet answered with a JSON-RPC `error` object.
    #[error("wallet RPC '{method}' returned error {code}: {message}; params: {params}")]
    Rpc {
        /// Error code reported by the wallet
        code: i64,
        /// Error message reported by the wallet
        message: String,
        /// Optional error payload
        data: Option<Value>,
        /// Method of the originating request
        method: String,
        /// Params of the originating request
        params: Value,
    },
}

impl RpcError {
    /// Create a new Connect error.
    pub fn connect(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Connect {
            url: url.into(),
            detail: detail.into(),
        }
    }

    /// Create a new Transport error.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }

    /// Create a new Encode error.
    pub fn encode(detail: impl Into<String>) -> Self {
        Self::Encode(detail.into())
    }

    /// Create a new MalformedResponse error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    /// Create a new InvalidResponse error.
    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self::InvalidResponse(detail.into())
    }

    /// Whether a later identical call could plausibly succeed.
    ///
    /// Payment pages keep showing "waiting for payment" on transient failures
    /// and re-poll; anything else should abort with a visible diagnostic.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::Transport(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 408 | 500 | 502 | 503),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_display() {
        let err = RpcError::connect("http://127.0.0.1:18083/json_rpc", "connection refused");
        assert_eq!(
            err.to_string(),
            "unable to connect to http://127.0.0.1:18083/json_rpc: connection refused"
        );
    }

    #[test]
    fn test_http_status_display_mirrors_reason_phrase() {
        let err = RpcError::HttpStatus {
            code: 401,
            reason: "Unauthorized",
        };
        assert_eq!(err.to_string(), "response HTTP error: 401 Unauthorized");
    }

    #[test]
    fn test_id_mismatch_display() {
        let err = RpcError::IdMismatch { sent: 3, got: 7 };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_rpc_error_carries_method_and_params() {
        let err = RpcError::Rpc {
            code: -32601,
            message: "Method not found".into(),
            data: None,
            method: "create_address".into(),
            params: serde_json::json!({"account_index": 0}),
        };
        let text = err.to_string();
        assert!(text.contains("create_address"));
        assert!(text.contains("account_index"));
        assert!(text.contains("-32601"));
    }

    #[test]
    fn test_is_transient() {
        assert!(RpcError::connect("http://x", "refused").is_transient());
        assert!(RpcError::transport("read timed out").is_transient());
        assert!(RpcError::HttpStatus {
            code: 503,
            reason: "Service Unavailable"
        }
        .is_transient());
        assert!(!RpcError::HttpStatus {
            code: 401,
            reason: "Unauthorized"
        }
        .is_transient());
        assert!(!RpcError::IdMismatch { sent: 1, got: 2 }.is_transient());
        assert!(!RpcError::malformed("syntax error").is_transient());
    }
}
