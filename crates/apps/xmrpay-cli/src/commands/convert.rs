//! Convert an order total into XMR.

use xmrpay_checkout::Currency;

use crate::commands::payment_service;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{ConvertOutput, OutputFormat, Render};

/// Execute the convert command.
pub async fn convert(
    config: CliConfig,
    amount: f64,
    currency: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let currency = Currency::from_code(currency)?;
    let service = payment_service(&config)?;

    let price_xmr = service.convert(amount, currency).await?;

    Ok(ConvertOutput {
        amount,
        currency: currency.code().to_string(),
        price_xmr,
    }
    .render(format))
}
