//! Subaddress allocation, conversion, and payment verification.

use serde::Serialize;
use tracing::{debug, warn};

use xmrpay_wallet::{xmr_to_atomic, WalletRpc};

use crate::error::CheckoutResult;
use crate::oracle::{Currency, PriceOracle};

/// Length of a wallet address token.
const SUBADDRESS_LEN: usize = 95;

/// Fractional digits kept by [`PaymentService::convert`]: one less than the
/// atomic-unit scale, leaving headroom against float rounding at the final
/// conversion step.
const CONVERT_DECIMALS: i32 = 11;

const MSG_WAITING: &str = "We are waiting for your payment.";
const MSG_RECEIVED: &str = "Payment has been received. Thanks!";
const MSG_CONFIRMED: &str = "Payment has been received and confirmed. Thanks!";

/// Outcome of one verification poll.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentVerdict {
    /// Whether the expected amount has arrived under the active policy
    pub paid: bool,
    /// Status line for the payment page
    pub message: String,
    /// Sum of the transfers that counted, atomic units
    pub total_received: u64,
}

impl PaymentVerdict {
    fn waiting(total_received: u64) -> Self {
        Self {
            paid: false,
            message: MSG_WAITING.to_string(),
            total_received,
        }
    }

    fn received(total_received: u64) -> Self {
        Self {
            paid: true,
            message: MSG_RECEIVED.to_string(),
            total_received,
        }
    }

    fn confirmed(total_received: u64) -> Self {
        Self {
            paid: true,
            message: MSG_CONFIRMED.to_string(),
            total_received,
        }
    }
}

/// Structural check for a previously issued address token: exactly 95
/// alphanumeric characters.
///
/// Nothing cryptographic happens here; the wallet daemon remains the
/// authority on whether the address actually belongs to it.
pub fn is_well_formed_address(token: &str) -> bool {
    token.len() == SUBADDRESS_LEN && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Merchant-side payment logic over a wallet gateway and a price oracle.
///
/// Holds no daemon state of its own: every decision is made from data
/// fetched at call time, so it is safe to call from a polling loop.
pub struct PaymentService<W, O> {
    wallet: W,
    oracle: O,
    account_index: u32,
}

impl<W: WalletRpc, O: PriceOracle> PaymentService<W, O> {
    /// Create a service over account 0.
    pub fn new(wallet: W, oracle: O) -> Self {
        Self {
            wallet,
            oracle,
            account_index: 0,
        }
    }

    /// Derive receiving addresses under a different account.
    pub fn with_account_index(mut self, account_index: u32) -> Self {
        self.account_index = account_index;
        self
    }

    /// Hand back the receiving address for a payer context.
    ///
    /// A well-formed previously issued token is reused as-is, without any
    /// wallet round-trip, so one payer keeps one address for the life of
    /// their session. Anything else triggers a fresh allocation.
    pub async fn allocate_receiving_address(
        &self,
        existing: Option<&str>,
    ) -> CheckoutResult<String> {
        if let Some(token) = existing {
            if is_well_formed_address(token) {
                debug!("reusing previously issued subaddress");
                return Ok(token.to_string());
            }
            warn!("stored address token is malformed, allocating a fresh subaddress");
        }

        let subaddress = self.wallet.create_address(self.account_index, "").await?;
        Ok(subaddress.address)
    }

    /// Convert an order total in `currency` into decimal XMR.
    ///
    /// The result is rounded to 11 fractional digits. Fails with
    /// `RateUnavailable` when the feed is down and `UnsupportedCurrency`
    /// never arises here (the [`Currency`] type is the boundary for that).
    pub async fn convert(&self, amount: f64, currency: Currency) -> CheckoutResult<f64> {
        let rate = self.oracle.rate(currency).await?;
        Ok(round_decimals(amount / rate, CONVERT_DECIMALS))
    }

    /// Decide whether `expected_xmr` has arrived at `address`.
    ///
    /// With `required_confirmations == 0` every observed transfer counts,
    /// pool included. With a positive requirement the chain height is
    /// fetched once and only transfers buried at least that deep count;
    /// pool transfers have no height and can never qualify.
    ///
    /// The comparison is "received at least the expected amount": several
    /// partial transfers may combine to satisfy it, and overpayment is paid.
    pub async fn verify_payment(
        &self,
        address: &str,
        expected_xmr: f64,
        required_confirmations: u64,
    ) -> CheckoutResult<PaymentVerdict> {
        let expected_atomic = xmr_to_atomic(expected_xmr);

        let index = self.wallet.address_index(address).await?;
        let Some(minor_index) = index.minor else {
            // The wallet cannot map this address to an index (restored
            // wallet, foreign address). Observably the same as "nothing
            // received yet".
            warn!("address not known to the wallet, reporting zero transfers");
            return Ok(PaymentVerdict::waiting(0));
        };

        let transfers = self
            .wallet
            .subaddress_transfers(self.account_index, minor_index)
            .await?;

        if required_confirmations == 0 {
            let total: u64 = transfers.iter().map(|t| t.amount).sum();
            debug!(total, expected_atomic, "verified under zero-confirmation policy");
            return Ok(if total >= expected_atomic {
                PaymentVerdict::received(total)
            } else {
                PaymentVerdict::waiting(total)
            });
        }

        let current_height = self.wallet.height().await?;
        let total: u64 = transfers
            .iter()
            .filter(|t| t.confirmations(current_height) >= required_confirmations)
            .map(|t| t.amount)
            .sum();
        debug!(
            total,
            expected_atomic,
            current_height,
            required_confirmations,
            "verified under confirmation policy"
        );
        Ok(if total >= expected_atomic {
            PaymentVerdict::confirmed(total)
        } else {
            PaymentVerdict::waiting(total)
        })
    }
}

impl<W, O> std::fmt::Debug for PaymentService<W, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("account_index", &self.account_index)
            .finish_non_exhaustive()
    }
}

fn round_decimals(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_address() {
        let token = "4".repeat(95);
        assert!(is_well_formed_address(&token));

        let mixed = format!("8{}xYz9", "A".repeat(90));
        assert_eq!(mixed.len(), 95);
        assert!(is_well_formed_address(&mixed));
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        assert!(!is_well_formed_address(""));
        assert!(!is_well_formed_address(&"4".repeat(94)));
        assert!(!is_well_formed_address(&"4".repeat(96)));

        let with_symbol = format!("{}!", "4".repeat(94));
        assert!(!is_well_formed_address(&with_symbol));

        let with_space = format!("{} ", "4".repeat(94));
        assert!(!is_well_formed_address(&with_space));
    }

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_decimals(0.123_456_789_012_34, 11), 0.123_456_789_01);
        assert_eq!(round_decimals(1.0, 11), 1.0);
        // Value already at 11 digits is a fixed point.
        let v = 0.635_838_297_41;
        assert_eq!(round_decimals(v, 11), v);
    }

    #[test]
    fn test_verdict_messages() {
        assert!(!PaymentVerdict::waiting(0).paid);
        assert!(PaymentVerdict::received(5).paid);
        assert!(PaymentVerdict::confirmed(5).message.contains("confirmed"));
        assert!(!PaymentVerdict::received(5).message.contains("confirmed"));
    }
}
