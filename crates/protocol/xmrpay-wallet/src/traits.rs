//! Wallet gateway trait definition.

use async_trait::async_trait;

use crate::error::WalletResult;
use crate::types::{AddressIndex, Subaddress, TransferCollection};

/// The wallet operations the payment layer depends on.
///
/// This trait abstracts the wallet daemon so the verification logic can run
/// against:
/// - the real `WalletClient` in production
/// - an in-memory mock in tests
#[async_trait]
pub trait WalletRpc: Send + Sync {
    /// Derive a fresh subaddress under `account_index` and persist wallet
    /// state before returning it.
    ///
    /// Persistence is part of this operation's contract: if the wallet cannot
    /// store the new derivation, the whole allocation fails rather than
    /// handing out an address that may vanish on restart.
    async fn create_address(&self, account_index: u32, label: &str) -> WalletResult<Subaddress>;

    /// Resolve an address to its account/minor index.
    ///
    /// Addresses unknown to the wallet come back with `minor: None`; callers
    /// treat that as "no known transfers".
    async fn address_index(&self, address: &str) -> WalletResult<AddressIndex>;

    /// Confirmed and pool transfers received on one subaddress index.
    async fn subaddress_transfers(
        &self,
        account_index: u32,
        minor_index: u32,
    ) -> WalletResult<TransferCollection>;

    /// Current wallet blockchain height.
    async fn height(&self) -> WalletResult<u64>;
}
