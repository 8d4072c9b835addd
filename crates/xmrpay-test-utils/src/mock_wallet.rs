//! Mock implementation of the `WalletRpc` trait for testing.
//!
//! Tracks derived subaddresses, configured transfers, and per-method call
//! counts in memory.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use xmrpay_rpc::RpcError;
use xmrpay_wallet::{
    AddressIndex, Subaddress, TransferCollection, WalletResult, WalletRpc,
};

use crate::helpers::test_subaddress;

struct MockWalletInner {
    /// Minor index assigned to the next derived subaddress.
    next_minor: u32,
    /// Derived subaddresses, in order.
    created: Vec<Subaddress>,
    /// Address -> resolved index.
    address_indices: HashMap<String, AddressIndex>,
    /// Minor index -> transfers reported for it.
    transfers: HashMap<u32, TransferCollection>,
    /// Chain height reported by `height`.
    height: u64,
    /// When true, every operation fails with a connection error.
    should_fail: bool,
    /// Per-method call counters.
    calls: HashMap<&'static str, u32>,
}

/// A mock implementation of the `WalletRpc` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and all
/// clones share the same state.
#[derive(Clone)]
pub struct MockWallet {
    inner: Arc<RwLock<MockWalletInner>>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    /// Create an empty wallet at height 0.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockWalletInner {
                next_minor: 1,
                created: Vec::new(),
                address_indices: HashMap::new(),
                transfers: HashMap::new(),
                height: 0,
                should_fail: false,
                calls: HashMap::new(),
            })),
        }
    }

    /// Set the reported chain height.
    pub fn with_height(self, height: u64) -> Self {
        self.inner.write().unwrap().height = height;
        self
    }

    /// Register a resolved index for an address. Pass `minor: None` to model
    /// an address the wallet does not know.
    pub fn with_address_index(self, address: &str, major: u32, minor: Option<u32>) -> Self {
        self.inner
            .write()
            .unwrap()
            .address_indices
            .insert(address.to_string(), AddressIndex { major, minor });
        self
    }

    /// Set the transfers reported for a minor index.
    pub fn with_transfers(self, minor_index: u32, transfers: TransferCollection) -> Self {
        self.inner
            .write()
            .unwrap()
            .transfers
            .insert(minor_index, transfers);
        self
    }

    /// Configure the mock to fail all operations.
    pub fn with_failure(self) -> Self {
        self.inner.write().unwrap().should_fail = true;
        self
    }

    /// Flip the failure mode at runtime.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.write().unwrap().should_fail = should_fail;
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Subaddresses derived so far, in order.
    pub fn created_addresses(&self) -> Vec<Subaddress> {
        self.inner.read().unwrap().created.clone()
    }

    /// How many times `method` was invoked.
    pub fn calls(&self, method: &str) -> u32 {
        self.inner
            .read()
            .unwrap()
            .calls
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    /// Total invocations across all methods.
    pub fn total_calls(&self) -> u32 {
        self.inner.read().unwrap().calls.values().sum()
    }

    fn record(&self, method: &'static str) -> WalletResult<()> {
        let mut inner = self.inner.write().unwrap();
        *inner.calls.entry(method).or_insert(0) += 1;
        if inner.should_fail {
            return Err(RpcError::connect(
                "http://127.0.0.1:18083/json_rpc",
                "connection refused",
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl WalletRpc for MockWallet {
    async fn create_address(&self, account_index: u32, label: &str) -> WalletResult<Subaddress> {
        self.record("create_address")?;
        let mut inner = self.inner.write().unwrap();
        let minor = inner.next_minor;
        inner.next_minor += 1;

        let subaddress = Subaddress {
            address: test_subaddress(minor),
            address_index: minor,
            account_index,
            label: label.to_string(),
        };
        inner.created.push(subaddress.clone());
        inner.address_indices.insert(
            subaddress.address.clone(),
            AddressIndex {
                major: account_index,
                minor: Some(minor),
            },
        );
        Ok(subaddress)
    }

    async fn address_index(&self, address: &str) -> WalletResult<AddressIndex> {
        self.record("get_address_index")?;
        let inner = self.inner.read().unwrap();
        Ok(inner
            .address_indices
            .get(address)
            .copied()
            .unwrap_or(AddressIndex {
                major: 0,
                minor: None,
            }))
    }

    async fn subaddress_transfers(
        &self,
        _account_index: u32,
        minor_index: u32,
    ) -> WalletResult<TransferCollection> {
        self.record("get_transfers")?;
        let inner = self.inner.read().unwrap();
        Ok(inner
            .transfers
            .get(&minor_index)
            .cloned()
            .unwrap_or_default())
    }

    async fn height(&self) -> WalletResult<u64> {
        self.record("getheight")?;
        Ok(self.inner.read().unwrap().height)
    }
}
