//! Show wallet blockchain height command.

use crate::commands::wallet_client;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{HeightOutput, OutputFormat, Render};

/// Execute the height command.
pub async fn height(config: CliConfig, format: OutputFormat) -> CliResult<String> {
    let wallet = wallet_client(&config)?;
    let height = wallet.height().await?;

    Ok(HeightOutput { height }.render(format))
}
