//! Error types for the checkout layer.

use thiserror::Error;
use xmrpay_wallet::WalletError;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Errors that can occur while pricing or verifying a payment.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The currency code is outside the supported set.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// The price feed produced no usable rate.
    #[error("exchange rate unavailable for {currency}: {detail}")]
    RateUnavailable {
        /// Currency the rate was requested for
        currency: String,
        /// What went wrong
        detail: String,
    },

    /// Wallet gateway failure.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl CheckoutError {
    /// Create a new UnsupportedCurrency error.
    pub fn unsupported_currency(code: impl Into<String>) -> Self {
        Self::UnsupportedCurrency(code.into())
    }

    /// Create a new RateUnavailable error.
    pub fn rate_unavailable(currency: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::RateUnavailable {
            currency: currency.into(),
            detail: detail.into(),
        }
    }

    /// Whether a later identical call could plausibly succeed.
    ///
    /// A payment page keeps polling through transient failures; an
    /// unsupported currency is a configuration problem and aborts the flow.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::UnsupportedCurrency(_) => false,
            Self::RateUnavailable { .. } => true,
            Self::Wallet(e) => e.is_transient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_currency_display() {
        let err = CheckoutError::unsupported_currency("JPY");
        assert_eq!(err.to_string(), "unsupported currency: JPY");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_rate_unavailable_is_transient() {
        let err = CheckoutError::rate_unavailable("USD", "connection reset");
        assert!(err.is_transient());
        assert!(err.to_string().contains("USD"));
    }

    #[test]
    fn test_wallet_error_transience_passes_through() {
        let err = CheckoutError::from(WalletError::unexpected_response("getheight", "boom"));
        assert!(!err.is_transient());
    }
}
