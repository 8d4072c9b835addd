//! Allocate a receiving subaddress.

use xmrpay_checkout::is_well_formed_address;

use crate::commands::payment_service;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{AddressOutput, OutputFormat, Render};

/// Execute the address command.
pub async fn address(
    config: CliConfig,
    reuse: Option<String>,
    format: OutputFormat,
) -> CliResult<String> {
    let service = payment_service(&config)?;

    let reused = reuse
        .as_deref()
        .map(is_well_formed_address)
        .unwrap_or(false);
    let address = service.allocate_receiving_address(reuse.as_deref()).await?;

    Ok(AddressOutput { address, reused }.render(format))
}
