//! CLI error type.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// Checkout-layer failure (conversion, verification).
    #[error(transparent)]
    Checkout(#[from] xmrpay_checkout::CheckoutError),

    /// Wallet gateway failure.
    #[error(transparent)]
    Wallet(#[from] xmrpay_wallet::WalletError),

    /// RPC layer failure.
    #[error(transparent)]
    Rpc(#[from] xmrpay_rpc::RpcError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file did not parse.
    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Create a new Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
