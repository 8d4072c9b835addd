//! Show wallet balance command.

use crate::commands::wallet_client;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{BalanceOutput, OutputFormat, Render};

/// Execute the balance command.
pub async fn balance(config: CliConfig, format: OutputFormat) -> CliResult<String> {
    let wallet = wallet_client(&config)?;
    let balance = wallet.balance().await?;

    Ok(BalanceOutput {
        balance: balance.balance,
        unlocked_balance: balance.unlocked_balance,
    }
    .render(format))
}
