//! Typed views of wallet-rpc payloads.

use serde::{Deserialize, Serialize};

/// A derived receiving address.
///
/// Created once per payer context and stable for the life of that context;
/// never mutated after creation and never deleted by this crate (the wallet
/// daemon owns the lifecycle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subaddress {
    /// The 95-character address token
    pub address: String,
    /// Minor index within the account
    pub address_index: u32,
    /// Account the address was derived under
    #[serde(default)]
    pub account_index: u32,
    /// Label given at creation time
    #[serde(default)]
    pub label: String,
}

/// Resolved account/minor index of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressIndex {
    /// Account index
    pub major: u32,
    /// Minor index; absent for addresses the wallet does not know.
    /// Downstream treats absence as "no known transfers", not as an error.
    #[serde(default)]
    pub minor: Option<u32>,
}

/// One incoming transfer as observed at poll time. Immutable snapshot; the
/// next poll fetches a fresh set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Amount in atomic units
    pub amount: u64,
    /// Transaction id
    pub txid: String,
    /// Block height at which the transfer was observed; 0 while it is still
    /// in the pool
    #[serde(default)]
    pub height: u64,
}

impl Transfer {
    /// Confirmation count at `current_height`.
    ///
    /// A pool transfer has no height and therefore zero confirmations,
    /// whatever the subtraction would otherwise produce.
    pub fn confirmations(&self, current_height: u64) -> u64 {
        if self.height == 0 {
            0
        } else {
            current_height.saturating_sub(self.height)
        }
    }
}

/// Transfers grouped the way `get_transfers` returns them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferCollection {
    /// Confirmed incoming transfers
    #[serde(default, rename = "in")]
    pub incoming: Vec<Transfer>,
    /// Transfers still in the pool
    #[serde(default)]
    pub pool: Vec<Transfer>,
}

impl TransferCollection {
    /// Iterate over confirmed and pool transfers alike.
    pub fn iter(&self) -> impl Iterator<Item = &Transfer> {
        self.incoming.iter().chain(self.pool.iter())
    }

    /// Total number of observed transfers.
    pub fn len(&self) -> usize {
        self.incoming.len() + self.pool.len()
    }

    /// Whether nothing has been observed at all.
    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty() && self.pool.is_empty()
    }
}

/// Selector for `get_transfers`.
#[derive(Debug, Clone, Serialize)]
pub struct TransferQuery {
    /// Include confirmed incoming transfers
    #[serde(rename = "in")]
    pub incoming: bool,
    /// Include outgoing transfers
    pub out: bool,
    /// Include pending outgoing transfers
    pub pending: bool,
    /// Include failed transfers
    pub failed: bool,
    /// Include pool transfers
    pub pool: bool,
    /// Account to query
    pub account_index: u32,
    /// Restrict to these minor indices (empty = all)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subaddr_indices: Vec<u32>,
}

impl Default for TransferQuery {
    fn default() -> Self {
        Self {
            incoming: true,
            out: false,
            pending: false,
            failed: false,
            pool: false,
            account_index: 0,
            subaddr_indices: Vec::new(),
        }
    }
}

impl TransferQuery {
    /// Confirmed and pool transfers received on one subaddress index.
    pub fn subaddress(account_index: u32, minor_index: u32) -> Self {
        Self {
            pool: true,
            account_index,
            subaddr_indices: vec![minor_index],
            ..Self::default()
        }
    }
}

/// Wallet balance snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Balance {
    /// Total balance in atomic units
    pub balance: u64,
    /// Spendable part of the balance
    #[serde(default)]
    pub unlocked_balance: u64,
}

/// An integrated address (base address plus an encoded payment id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedAddress {
    /// The composite address
    pub integrated_address: String,
    /// The payment id it encodes
    #[serde(default)]
    pub payment_id: String,
}

/// Components of a split integrated address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitAddress {
    /// The base address
    pub standard_address: String,
    /// The decoded payment id
    #[serde(default)]
    pub payment_id: String,
    /// Whether the base address is itself a subaddress
    #[serde(default)]
    pub is_subaddress: bool,
}

/// Receipt for a submitted transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Transaction secret key, when requested
    #[serde(default)]
    pub tx_key: String,
    /// Amount actually sent, atomic units
    #[serde(default)]
    pub amount: u64,
    /// Fee paid, atomic units
    #[serde(default)]
    pub fee: u64,
}

/// A payment-id indexed incoming payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment id the funds arrived under
    pub payment_id: String,
    /// Transaction hash
    pub tx_hash: String,
    /// Amount in atomic units
    pub amount: u64,
    /// Height of the containing block
    #[serde(default)]
    pub block_height: u64,
    /// Unlock time constraint, if any
    #[serde(default)]
    pub unlock_time: u64,
}

/// One spendable output as reported by `incoming_transfers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingTransfer {
    /// Amount in atomic units
    pub amount: u64,
    /// Transaction hash
    pub tx_hash: String,
    /// Whether the output is already spent
    #[serde(default)]
    pub spent: bool,
    /// Global output index
    #[serde(default)]
    pub global_index: u64,
}

/// Filter for `incoming_transfers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    /// Every known output
    #[default]
    All,
    /// Only spendable outputs
    Available,
    /// Only spent outputs
    Unavailable,
}

impl TransferType {
    /// Wire name of the filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for TransferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment-request URI decomposed by the wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedUri {
    /// Destination address
    pub address: String,
    /// Requested amount in atomic units
    #[serde(default)]
    pub amount: u64,
    /// Encoded payment id, if any
    #[serde(default)]
    pub payment_id: String,
    /// Recipient display name
    #[serde(default)]
    pub recipient_name: String,
    /// Free-form description
    #[serde(default)]
    pub tx_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmations() {
        let confirmed = Transfer {
            amount: 100,
            txid: "ab".into(),
            height: 85,
        };
        assert_eq!(confirmed.confirmations(100), 15);
        assert_eq!(confirmed.confirmations(85), 0);
        // Wallet momentarily behind the transfer's height.
        assert_eq!(confirmed.confirmations(80), 0);
    }

    #[test]
    fn test_pool_transfer_never_confirms() {
        let pool = Transfer {
            amount: 100,
            txid: "cd".into(),
            height: 0,
        };
        assert_eq!(pool.confirmations(1_000_000), 0);
    }

    #[test]
    fn test_transfer_collection_deserialize_partial() {
        // The wallet omits empty groups entirely.
        let collection: TransferCollection = serde_json::from_value(serde_json::json!({
            "in": [{"amount": 500, "txid": "aa", "height": 10}]
        }))
        .unwrap();
        assert_eq!(collection.incoming.len(), 1);
        assert!(collection.pool.is_empty());
        assert_eq!(collection.len(), 1);

        let empty: TransferCollection = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_transfer_collection_iter_spans_groups() {
        let collection = TransferCollection {
            incoming: vec![Transfer {
                amount: 1,
                txid: "a".into(),
                height: 5,
            }],
            pool: vec![Transfer {
                amount: 2,
                txid: "b".into(),
                height: 0,
            }],
        };
        let amounts: Vec<u64> = collection.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![1, 2]);
    }

    #[test]
    fn test_address_index_minor_optional() {
        let known: AddressIndex =
            serde_json::from_value(serde_json::json!({"major": 0, "minor": 7})).unwrap();
        assert_eq!(known.minor, Some(7));

        let unknown: AddressIndex = serde_json::from_value(serde_json::json!({"major": 0})).unwrap();
        assert_eq!(unknown.minor, None);
    }

    #[test]
    fn test_transfer_query_wire_shape() {
        let query = TransferQuery::subaddress(0, 4);
        let params = serde_json::to_value(&query).unwrap();
        assert_eq!(params["in"], true);
        assert_eq!(params["pool"], true);
        assert_eq!(params["out"], false);
        assert_eq!(params["subaddr_indices"], serde_json::json!([4]));
    }

    #[test]
    fn test_transfer_query_omits_empty_indices() {
        let params = serde_json::to_value(TransferQuery::default()).unwrap();
        assert!(params.get("subaddr_indices").is_none());
    }

    #[test]
    fn test_transfer_type_names() {
        assert_eq!(TransferType::All.as_str(), "all");
        assert_eq!(TransferType::Available.to_string(), "available");
    }
}
