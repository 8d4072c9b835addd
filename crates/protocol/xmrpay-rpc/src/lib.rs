//! Strict JSON-RPC 2.0 client for `monero-wallet-rpc`.
//!
//! This crate is the bottom of the xmrpay stack: it moves one JSON-RPC
//! request/response pair over HTTP and refuses to hand anything ambiguous to
//! the layers above.
//!
//! # Architecture
//!
//! ```text
//! xmrpay-wallet                xmrpay-rpc
//! ┌──────────────┐      ┌─────────────────────────┐
//! │ WalletClient │ ───► │ RpcClient               │
//! └──────────────┘      │   └─ Transport (trait)  │
//!                       │        └─ HttpTransport │
//!                       └────────────┬────────────┘
//!                                    │ POST /json_rpc
//!                                    ▼
//!                       ┌─────────────────────────┐
//!                       │ monero-wallet-rpc       │
//!                       └─────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Request ids are per-client-instance, atomic, strictly increasing from 1.
//! - A response is accepted only if it parses, carries our id, and has no
//!   `error` member; every other outcome is a typed [`RpcError`].
//! - One call, one request: no retries, caching, or backoff. Callers that
//!   poll own their own cadence.
//! - Timeouts are mandatory (8 s connect / 8 s total by default) so a stalled
//!   wallet daemon cannot hang the merchant page.

pub mod client;
pub mod error;
pub mod transport;

// Re-export main types
pub use client::{RpcClient, RpcErrorObject, JSONRPC_VERSION};
pub use error::{RpcError, RpcResult};
pub use transport::{
    HttpTransport, Transport, TransportConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT,
};
