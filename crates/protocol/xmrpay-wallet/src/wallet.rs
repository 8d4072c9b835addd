//! Typed wallet client over the JSON-RPC layer.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use xmrpay_rpc::{HttpTransport, RpcClient, Transport, TransportConfig};

use crate::amount::xmr_to_atomic;
use crate::error::{WalletError, WalletResult};
use crate::traits::WalletRpc;
use crate::types::{
    AddressIndex, Balance, IncomingTransfer, IntegratedAddress, ParsedUri, PaymentRecord,
    SplitAddress, Subaddress, TransferCollection, TransferQuery, TransferReceipt, TransferType,
};

/// Typed gateway to a `monero-wallet-rpc` instance.
///
/// One thin wrapper per wallet operation; every wrapper is a single RPC call
/// (except [`WalletClient::create_address`], whose contract includes the
/// `store` persistence call).
pub struct WalletClient<T = HttpTransport> {
    rpc: RpcClient<T>,
}

impl WalletClient<HttpTransport> {
    /// Connect to a wallet-rpc endpoint by host and port.
    pub fn connect(host: &str, port: u16, config: &TransportConfig) -> WalletResult<Self> {
        let url = format!("http://{host}:{port}/json_rpc");
        Ok(Self::new(RpcClient::connect(url, config)?))
    }
}

impl<T: Transport> WalletClient<T> {
    /// Wrap an existing RPC client.
    pub fn new(rpc: RpcClient<T>) -> Self {
        Self { rpc }
    }

    /// Call `method` and deserialize the `result` member into `R`.
    async fn call_into<R: DeserializeOwned>(&self, method: &str, params: Value) -> WalletResult<R> {
        let result = self.rpc.call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| WalletError::unexpected_response(method, e.to_string()))
    }

    /// Force the wallet to flush its state to disk.
    pub async fn store(&self) -> WalletResult<()> {
        self.rpc.call("store", Value::Null).await?;
        Ok(())
    }

    /// Derive a fresh subaddress and persist wallet state before returning it.
    ///
    /// A new derivation only exists in memory until the wallet stores it, so
    /// the allocation fails as a whole if the `store` call fails: an unsaved
    /// subaddress must never be shown to a payer.
    pub async fn create_address(&self, account_index: u32, label: &str) -> WalletResult<Subaddress> {
        #[derive(Deserialize)]
        struct Created {
            address: String,
            address_index: u32,
        }

        let created: Created = self
            .call_into(
                "create_address",
                json!({"account_index": account_index, "label": label}),
            )
            .await?;
        self.store().await?;

        info!(
            account_index,
            address_index = created.address_index,
            "derived and persisted new subaddress"
        );
        Ok(Subaddress {
            address: created.address,
            address_index: created.address_index,
            account_index,
            label: label.to_string(),
        })
    }

    /// The wallet's primary address.
    pub async fn address(&self) -> WalletResult<String> {
        #[derive(Deserialize)]
        struct Addr {
            address: String,
        }
        let addr: Addr = self.call_into("getaddress", Value::Null).await?;
        Ok(addr.address)
    }

    /// Resolve an address to its account/minor index.
    pub async fn address_index(&self, address: &str) -> WalletResult<AddressIndex> {
        #[derive(Deserialize)]
        struct Resolved {
            index: AddressIndex,
        }
        let resolved: Resolved = self
            .call_into("get_address_index", json!({"address": address}))
            .await?;
        Ok(resolved.index)
    }

    /// Transfers matching `query`.
    pub async fn transfers(&self, query: &TransferQuery) -> WalletResult<TransferCollection> {
        let params = serde_json::to_value(query)
            .map_err(|e| WalletError::unexpected_response("get_transfers", e.to_string()))?;
        debug!(account_index = query.account_index, "fetching transfers");
        self.call_into("get_transfers", params).await
    }

    /// Spendable outputs, optionally filtered by spent state.
    pub async fn incoming_transfers(
        &self,
        transfer_type: TransferType,
    ) -> WalletResult<Vec<IncomingTransfer>> {
        #[derive(Deserialize)]
        struct Listing {
            #[serde(default)]
            transfers: Vec<IncomingTransfer>,
        }
        let listing: Listing = self
            .call_into(
                "incoming_transfers",
                json!({"transfer_type": transfer_type.as_str()}),
            )
            .await?;
        Ok(listing.transfers)
    }

    /// Wallet balance.
    pub async fn balance(&self) -> WalletResult<Balance> {
        self.call_into("getbalance", Value::Null).await
    }

    /// Current wallet blockchain height.
    pub async fn height(&self) -> WalletResult<u64> {
        #[derive(Deserialize)]
        struct Height {
            height: u64,
        }
        let height: Height = self.call_into("getheight", Value::Null).await?;
        Ok(height.height)
    }

    /// The wallet's private view key.
    pub async fn view_key(&self) -> WalletResult<String> {
        #[derive(Deserialize)]
        struct Key {
            key: String,
        }
        let key: Key = self
            .call_into("query_key", json!({"key_type": "view_key"}))
            .await?;
        Ok(key.key)
    }

    /// Build an integrated address for `payment_id` (empty = wallet picks a
    /// random one).
    pub async fn make_integrated_address(
        &self,
        payment_id: &str,
    ) -> WalletResult<IntegratedAddress> {
        self.call_into(
            "make_integrated_address",
            json!({"payment_id": payment_id}),
        )
        .await
    }

    /// Split an integrated address into base address and payment id.
    pub async fn split_integrated_address(
        &self,
        integrated_address: &str,
    ) -> WalletResult<SplitAddress> {
        self.call_into(
            "split_integrated_address",
            json!({"integrated_address": integrated_address}),
        )
        .await
    }

    /// Build a payment-request URI.
    pub async fn make_uri(
        &self,
        address: &str,
        amount_xmr: f64,
        recipient_name: Option<&str>,
        description: Option<&str>,
    ) -> WalletResult<String> {
        #[derive(Deserialize)]
        struct Uri {
            uri: String,
        }
        let uri: Uri = self
            .call_into(
                "make_uri",
                json!({
                    "address": address,
                    "amount": xmr_to_atomic(amount_xmr),
                    "payment_id": "",
                    "recipient_name": recipient_name,
                    "tx_description": description,
                }),
            )
            .await?;
        Ok(uri.uri)
    }

    /// Decompose a payment-request URI.
    pub async fn parse_uri(&self, uri: &str) -> WalletResult<ParsedUri> {
        #[derive(Deserialize)]
        struct Parsed {
            uri: ParsedUri,
        }
        let parsed: Parsed = self.call_into("parse_uri", json!({"uri": uri})).await?;
        Ok(parsed.uri)
    }

    /// Send `amount_xmr` to `address`.
    ///
    /// The decimal amount is scaled to atomic units before it reaches the
    /// wire; callers pre-round anything finer than 12 fractional digits.
    pub async fn transfer(
        &self,
        amount_xmr: f64,
        address: &str,
        mixin: u32,
    ) -> WalletResult<TransferReceipt> {
        let amount = xmr_to_atomic(amount_xmr);
        self.call_into(
            "transfer",
            json!({
                "destinations": [{"amount": amount, "address": address}],
                "mixin": mixin,
                "get_tx_key": true,
                "unlock_time": 0,
            }),
        )
        .await
    }

    /// Incoming payments recorded under one payment id.
    pub async fn payments(&self, payment_id: &str) -> WalletResult<Vec<PaymentRecord>> {
        #[derive(Deserialize)]
        struct Payments {
            #[serde(default)]
            payments: Vec<PaymentRecord>,
        }
        let payments: Payments = self
            .call_into("get_payments", json!({"payment_id": payment_id}))
            .await?;
        Ok(payments.payments)
    }

    /// Incoming payments for several payment ids, at or above a height.
    pub async fn bulk_payments(
        &self,
        payment_ids: &[&str],
        min_block_height: u64,
    ) -> WalletResult<Vec<PaymentRecord>> {
        #[derive(Deserialize)]
        struct Payments {
            #[serde(default)]
            payments: Vec<PaymentRecord>,
        }
        let payments: Payments = self
            .call_into(
                "get_bulk_payments",
                json!({"payment_ids": payment_ids, "min_block_height": min_block_height}),
            )
            .await?;
        Ok(payments.payments)
    }
}

impl<T> std::fmt::Debug for WalletClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Transport> WalletRpc for WalletClient<T> {
    async fn create_address(&self, account_index: u32, label: &str) -> WalletResult<Subaddress> {
        WalletClient::create_address(self, account_index, label).await
    }

    async fn address_index(&self, address: &str) -> WalletResult<AddressIndex> {
        WalletClient::address_index(self, address).await
    }

    async fn subaddress_transfers(
        &self,
        account_index: u32,
        minor_index: u32,
    ) -> WalletResult<TransferCollection> {
        self.transfers(&TransferQuery::subaddress(account_index, minor_index))
            .await
    }

    async fn height(&self) -> WalletResult<u64> {
        WalletClient::height(self).await
    }
}
