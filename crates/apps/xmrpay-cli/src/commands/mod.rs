//! Command implementations.

pub mod address;
pub mod balance;
pub mod convert;
pub mod height;
pub mod verify;

use xmrpay_checkout::{CryptoCompareOracle, PaymentService};
use xmrpay_wallet::WalletClient;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Wallet client for the configured endpoint.
pub(crate) fn wallet_client(config: &CliConfig) -> CliResult<WalletClient> {
    Ok(WalletClient::connect(
        &config.wallet.host,
        config.wallet.port,
        &config.transport,
    )?)
}

/// Payment service over the configured wallet and the public price feed.
pub(crate) fn payment_service(
    config: &CliConfig,
) -> CliResult<PaymentService<WalletClient, CryptoCompareOracle>> {
    let service = PaymentService::new(wallet_client(config)?, CryptoCompareOracle::new()?)
        .with_account_index(config.wallet.account_index);
    Ok(service)
}
