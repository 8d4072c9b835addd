//! Verify that a payment has arrived.

use std::time::Duration;

use tracing::{info, warn};
use xmrpay_checkout::Currency;

use crate::commands::payment_service;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Render, VerdictOutput};

/// Execute the verify command.
///
/// In watch mode this keeps polling at the configured interval (the same
/// cadence a hosted payment page reloads at) until the payment arrives.
/// Transient failures are logged and polled through; anything else aborts
/// with a diagnostic.
#[allow(clippy::too_many_arguments)]
pub async fn verify(
    config: CliConfig,
    address: String,
    amount: f64,
    currency: &str,
    confirmations: Option<u64>,
    watch: bool,
    format: OutputFormat,
) -> CliResult<String> {
    let currency = Currency::from_code(currency)?;
    let service = payment_service(&config)?;

    let required = confirmations.unwrap_or(config.payment.num_confirmations);
    let expected_xmr = service.convert(amount, currency).await?;
    let interval = Duration::from_secs(config.payment.poll_interval_secs.max(1));

    info!(
        expected_xmr,
        required, "checking for payment"
    );

    loop {
        match service.verify_payment(&address, expected_xmr, required).await {
            Ok(verdict) => {
                if verdict.paid || !watch {
                    return Ok(VerdictOutput::from(verdict).render(format));
                }
                info!(
                    total_received = verdict.total_received,
                    "payment not complete yet"
                );
            }
            Err(e) if watch && e.is_transient() => {
                warn!(error = %e, "transient failure, will poll again");
            }
            Err(e) => return Err(e.into()),
        }

        tokio::time::sleep(interval).await;
    }
}
