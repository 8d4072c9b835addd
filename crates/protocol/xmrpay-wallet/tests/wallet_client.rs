//! Integration tests for the typed wallet client over a scripted transport.

use serde_json::json;
use xmrpay_rpc::RpcClient;
use xmrpay_wallet::{TransferQuery, WalletClient, WalletError};
use xmrpay_test_utils::{test_subaddress, MockReply, MockTransport};

fn wallet(transport: &MockTransport) -> WalletClient<MockTransport> {
    WalletClient::new(RpcClient::new(transport.clone()))
}

// =============================================================================
// Address Allocation
// =============================================================================

#[tokio::test]
async fn test_create_address_persists_before_returning() {
    let transport = MockTransport::new();
    let token = test_subaddress(5);
    transport.push_result(json!({"address": token, "address_index": 5}));
    // Fallback null result answers the follow-up store call.
    let client = wallet(&transport);

    let subaddress = client.create_address(0, "order-12").await.unwrap();

    assert_eq!(subaddress.address, token);
    assert_eq!(subaddress.address_index, 5);
    assert_eq!(subaddress.account_index, 0);
    assert_eq!(subaddress.label, "order-12");
    // Derivation then persistence, in that order, before the caller sees it.
    assert_eq!(
        transport.sent_methods(),
        vec!["create_address".to_string(), "store".to_string()]
    );
}

#[tokio::test]
async fn test_create_address_fails_whole_allocation_when_store_fails() {
    let transport = MockTransport::new();
    transport.push_result(json!({"address": test_subaddress(6), "address_index": 6}));
    transport.push(MockReply::RpcError {
        code: -1,
        message: "wallet file busy".into(),
    });
    let client = wallet(&transport);

    let err = client.create_address(0, "").await.unwrap_err();
    assert!(matches!(err, WalletError::Rpc(_)));
    // Both wire calls happened; the address is withheld regardless.
    assert_eq!(transport.request_count(), 2);
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_address_index_resolves_minor() {
    let transport = MockTransport::new();
    transport.push_result(json!({"index": {"major": 0, "minor": 7}}));
    let client = wallet(&transport);

    let index = client.address_index(&test_subaddress(7)).await.unwrap();
    assert_eq!(index.major, 0);
    assert_eq!(index.minor, Some(7));
}

#[tokio::test]
async fn test_address_index_minor_may_be_absent() {
    let transport = MockTransport::new();
    transport.push_result(json!({"index": {"major": 0}}));
    let client = wallet(&transport);

    let index = client.address_index(&test_subaddress(8)).await.unwrap();
    assert_eq!(index.minor, None);
}

#[tokio::test]
async fn test_transfers_sends_subaddress_scoped_query() {
    let transport = MockTransport::new();
    transport.push_result(json!({
        "in": [{"amount": 600_000_000_000u64, "txid": "aa", "height": 2_400_000}],
        "pool": [{"amount": 500_000_000_000u64, "txid": "bb"}]
    }));
    let client = wallet(&transport);

    let transfers = client
        .transfers(&TransferQuery::subaddress(0, 4))
        .await
        .unwrap();

    assert_eq!(transfers.incoming.len(), 1);
    assert_eq!(transfers.pool.len(), 1);
    assert_eq!(transfers.pool[0].height, 0);

    let params = &transport.requests()[0]["params"];
    assert_eq!(params["in"], true);
    assert_eq!(params["pool"], true);
    assert_eq!(params["out"], false);
    assert_eq!(params["subaddr_indices"], json!([4]));
}

#[tokio::test]
async fn test_height() {
    let transport = MockTransport::new();
    transport.push_result(json!({"height": 2_400_123}));
    let client = wallet(&transport);

    assert_eq!(client.height().await.unwrap(), 2_400_123);
    assert_eq!(transport.sent_methods(), vec!["getheight".to_string()]);
}

#[tokio::test]
async fn test_balance() {
    let transport = MockTransport::new();
    transport.push_result(json!({"balance": 3_000_000_000_000u64, "unlocked_balance": 2_000_000_000_000u64}));
    let client = wallet(&transport);

    let balance = client.balance().await.unwrap();
    assert_eq!(balance.balance, 3_000_000_000_000);
    assert_eq!(balance.unlocked_balance, 2_000_000_000_000);
}

#[tokio::test]
async fn test_view_key() {
    let transport = MockTransport::new();
    transport.push_result(json!({"key": "deadbeef"}));
    let client = wallet(&transport);

    assert_eq!(client.view_key().await.unwrap(), "deadbeef");
    let params = &transport.requests()[0]["params"];
    assert_eq!(params["key_type"], "view_key");
}

#[tokio::test]
async fn test_unexpected_payload_shape_is_typed() {
    let transport = MockTransport::new();
    transport.push_result(json!({"not_height": 5}));
    let client = wallet(&transport);

    let err = client.height().await.unwrap_err();
    match err {
        WalletError::UnexpectedResponse { method, .. } => assert_eq!(method, "getheight"),
        other => panic!("expected UnexpectedResponse, got {other:?}"),
    }
}

// =============================================================================
// Amount-Bearing Operations
// =============================================================================

#[tokio::test]
async fn test_transfer_scales_to_atomic_units_exactly() {
    let transport = MockTransport::new();
    transport.push_result(json!({"tx_hash": "cafe", "tx_key": "feed", "fee": 30_000_000u64}));
    let client = wallet(&transport);

    let receipt = client
        .transfer(0.123_456_789_012, &test_subaddress(1), 4)
        .await
        .unwrap();
    assert_eq!(receipt.tx_hash, "cafe");

    let params = &transport.requests()[0]["params"];
    assert_eq!(params["destinations"][0]["amount"], 123_456_789_012u64);
    assert_eq!(params["mixin"], 4);
    assert_eq!(params["get_tx_key"], true);
    assert_eq!(params["unlock_time"], 0);
}

#[tokio::test]
async fn test_make_uri_uses_atomic_scale() {
    let transport = MockTransport::new();
    transport.push_result(json!({"uri": "monero:abc?tx_amount=1.5"}));
    let client = wallet(&transport);

    client
        .make_uri(&test_subaddress(2), 1.5, Some("shop"), None)
        .await
        .unwrap();

    let params = &transport.requests()[0]["params"];
    assert_eq!(params["amount"], 1_500_000_000_000u64);
    assert_eq!(params["recipient_name"], "shop");
}

// =============================================================================
// Integrated Addresses and Payments
// =============================================================================

#[tokio::test]
async fn test_make_and_split_integrated_address() {
    let transport = MockTransport::new();
    transport.push_result(json!({"integrated_address": "4LodgeXmr", "payment_id": "0011"}));
    transport.push_result(json!({"standard_address": "4Standard", "payment_id": "0011", "is_subaddress": false}));
    let client = wallet(&transport);

    let integrated = client.make_integrated_address("0011").await.unwrap();
    assert_eq!(integrated.integrated_address, "4LodgeXmr");

    let split = client.split_integrated_address("4LodgeXmr").await.unwrap();
    assert_eq!(split.standard_address, "4Standard");
    assert_eq!(split.payment_id, "0011");
}

#[tokio::test]
async fn test_payments_lookup_defaults_to_empty() {
    let transport = MockTransport::new();
    transport.push_result(json!({}));
    let client = wallet(&transport);

    let payments = client.payments("0011").await.unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn test_bulk_payments_params() {
    let transport = MockTransport::new();
    transport.push_result(json!({"payments": [
        {"payment_id": "0011", "tx_hash": "aa", "amount": 42u64, "block_height": 100}
    ]}));
    let client = wallet(&transport);

    let payments = client.bulk_payments(&["0011", "0022"], 90).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, 42);

    let params = &transport.requests()[0]["params"];
    assert_eq!(params["payment_ids"], json!(["0011", "0022"]));
    assert_eq!(params["min_block_height"], 90);
}
