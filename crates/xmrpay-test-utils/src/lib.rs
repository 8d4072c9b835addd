//! Shared test utilities for the xmrpay crates.
//!
//! - [`MockTransport`]: scriptable byte-level transport recording every
//!   request envelope, for exercising the JSON-RPC client.
//! - [`MockWallet`]: in-memory `WalletRpc` implementation with call counters,
//!   for exercising the payment service.
//! - [`FixedRateOracle`]: configurable `PriceOracle`.
//! - [`helpers`]: deterministic address tokens and transfer fixtures.

pub mod helpers;
mod mock_oracle;
mod mock_transport;
mod mock_wallet;

pub use helpers::{confirmed_transfer, pool_transfer, test_subaddress};
pub use mock_oracle::FixedRateOracle;
pub use mock_transport::{MockReply, MockTransport};
pub use mock_wallet::MockWallet;
