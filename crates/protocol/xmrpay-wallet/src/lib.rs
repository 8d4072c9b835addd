//! Typed gateway to `monero-wallet-rpc`.
//!
//! One thin, typed wrapper per wallet operation: subaddress derivation (with
//! persistence as part of the allocation contract), transfer listing,
//! address-index resolution, height and balance queries, key queries,
//! integrated addresses, payment-request URIs, and transfer creation.
//!
//! Amounts cross this boundary exactly once: decimal XMR at the API edge,
//! integer atomic units (10^12 per XMR) everywhere below. See [`amount`].
//!
//! The payment layer consumes this crate through the [`WalletRpc`] trait so
//! verification logic can be exercised against an in-memory wallet in tests.

pub mod amount;
mod error;
pub mod traits;
pub mod types;
mod wallet;

// Re-export main types
pub use amount::{atomic_to_xmr, format_xmr, xmr_to_atomic, ATOMIC_UNITS_PER_XMR};
pub use error::{WalletError, WalletResult};
pub use traits::WalletRpc;
pub use types::{
    AddressIndex, Balance, IncomingTransfer, IntegratedAddress, ParsedUri, PaymentRecord,
    SplitAddress, Subaddress, Transfer, TransferCollection, TransferQuery, TransferReceipt,
    TransferType,
};
pub use wallet::WalletClient;
