//! Error types for wallet gateway operations.

use thiserror::Error;
use xmrpay_rpc::RpcError;

/// Result type alias for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors that can occur while talking to the wallet daemon.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Transport or JSON-RPC protocol failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The call succeeded but the payload did not have the documented shape.
    #[error("unexpected {method} response: {detail}")]
    UnexpectedResponse {
        /// Wallet method that produced the payload
        method: String,
        /// What was wrong with it
        detail: String,
    },
}

impl WalletError {
    /// Create a new UnexpectedResponse error.
    pub fn unexpected_response(method: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            method: method.into(),
            detail: detail.into(),
        }
    }

    /// Whether a later identical call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Rpc(e) if e.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_response_display() {
        let err = WalletError::unexpected_response("get_transfers", "missing field `txid`");
        assert_eq!(
            err.to_string(),
            "unexpected get_transfers response: missing field `txid`"
        );
    }

    #[test]
    fn test_transient_follows_rpc() {
        let err = WalletError::from(RpcError::transport("read timed out"));
        assert!(err.is_transient());

        let err = WalletError::from(RpcError::IdMismatch { sent: 1, got: 2 });
        assert!(!err.is_transient());

        assert!(!WalletError::unexpected_response("getheight", "not an object").is_transient());
    }
}
