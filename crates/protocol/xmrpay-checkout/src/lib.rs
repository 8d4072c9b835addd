//! Merchant-side payment logic for the xmrpay stack.
//!
//! Three concerns live here, all stateless per call:
//!
//! - **Allocation**: hand a payer a receiving subaddress, reusing a
//!   previously issued token when it is structurally sound (exactly 95
//!   alphanumeric characters), deriving and persisting a fresh one otherwise.
//! - **Conversion**: turn an order total in a supported currency
//!   (USD/EUR/CAD/GBP/INR, or XMR at par) into decimal XMR via a
//!   [`PriceOracle`], rounded to 11 fractional digits.
//! - **Verification**: aggregate the wallet's view of incoming transfers for
//!   the payer's subaddress and decide paid / not-yet-paid under a
//!   zero-confirmation or N-confirmation policy.
//!
//! # Flow
//!
//! ```text
//! ┌──────────────┐  allocate / convert / verify   ┌─────────────────┐
//! │ merchant app │ ──────────────────────────────►│ PaymentService  │
//! │ (polls ~30s) │ ◄────────────── PaymentVerdict │   ├─ WalletRpc  │──► wallet daemon
//! └──────────────┘                                │   └─ PriceOracle│──► price feed
//!                                                 └─────────────────┘
//! ```
//!
//! Transient failures (daemon down, feed down) surface as typed errors with
//! `is_transient() == true`; the page keeps showing "waiting for payment"
//! and re-polls. Configuration mistakes (unsupported currency, bad endpoint)
//! are not transient and should abort with a visible diagnostic.

mod error;
pub mod oracle;
pub mod service;

// Re-export main types
pub use error::{CheckoutError, CheckoutResult};
pub use oracle::{CryptoCompareOracle, Currency, PriceOracle, CRYPTOCOMPARE_URL};
pub use service::{is_well_formed_address, PaymentService, PaymentVerdict};
