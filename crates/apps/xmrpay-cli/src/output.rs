//! Output rendering.

use colored::Colorize;
use serde::Serialize;

use xmrpay_checkout::PaymentVerdict;
use xmrpay_wallet::format_xmr;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Render a command result for the terminal.
pub trait Render {
    /// Render in the requested format.
    fn render(&self, format: OutputFormat) -> String;
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Result of the `address` command.
#[derive(Debug, Serialize)]
pub struct AddressOutput {
    /// The receiving address handed to the payer
    pub address: String,
    /// Whether a previously issued token was reused
    pub reused: bool,
}

impl Render for AddressOutput {
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => {
                let origin = if self.reused {
                    "reused".dimmed()
                } else {
                    "newly derived".green()
                };
                format!("Receiving address ({origin}):\n{}", self.address.bold())
            }
        }
    }
}

/// Result of the `convert` command.
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    /// Order total in the quoted currency
    pub amount: f64,
    /// Quoted currency code
    pub currency: String,
    /// Price in decimal XMR, rounded to 11 fractional digits
    pub price_xmr: f64,
}

impl Render for ConvertOutput {
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => format!(
                "{} {} = {} XMR",
                self.amount,
                self.currency,
                self.price_xmr.to_string().bold()
            ),
        }
    }
}

/// Result of the `verify` command.
#[derive(Debug, Serialize)]
pub struct VerdictOutput {
    /// Whether the expected amount has arrived
    pub paid: bool,
    /// Status line
    pub message: String,
    /// Sum of the transfers that counted, atomic units
    pub total_received: u64,
}

impl From<PaymentVerdict> for VerdictOutput {
    fn from(verdict: PaymentVerdict) -> Self {
        Self {
            paid: verdict.paid,
            message: verdict.message,
            total_received: verdict.total_received,
        }
    }
}

impl Render for VerdictOutput {
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => {
                let status = if self.paid {
                    self.message.green().to_string()
                } else {
                    self.message.yellow().to_string()
                };
                format!(
                    "{status}\nReceived so far: {}",
                    format_xmr(self.total_received)
                )
            }
        }
    }
}

/// Result of the `balance` command.
#[derive(Debug, Serialize)]
pub struct BalanceOutput {
    /// Total balance, atomic units
    pub balance: u64,
    /// Spendable balance, atomic units
    pub unlocked_balance: u64,
}

impl Render for BalanceOutput {
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => format!(
                "Balance:  {}\nUnlocked: {}",
                format_xmr(self.balance).bold(),
                format_xmr(self.unlocked_balance)
            ),
        }
    }
}

/// Result of the `height` command.
#[derive(Debug, Serialize)]
pub struct HeightOutput {
    /// Current wallet blockchain height
    pub height: u64,
}

impl Render for HeightOutput {
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => format!("Height: {}", self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_output() {
        let output = AddressOutput {
            address: "4".repeat(95),
            reused: false,
        };
        let human = output.render(OutputFormat::Human);
        assert!(human.contains("Receiving address"));
        assert!(human.contains(&"4".repeat(95)));

        let json = output.render(OutputFormat::Json);
        assert!(json.contains("\"reused\": false"));
    }

    #[test]
    fn test_verdict_output() {
        let output = VerdictOutput {
            paid: true,
            message: "Payment has been received and confirmed. Thanks!".into(),
            total_received: 1_100_000_000_000,
        };
        let human = output.render(OutputFormat::Human);
        assert!(human.contains("confirmed"));
        assert!(human.contains("1.100000000000 XMR"));

        let json = output.render(OutputFormat::Json);
        assert!(json.contains("\"paid\": true"));
        assert!(json.contains("1100000000000"));
    }

    #[test]
    fn test_balance_output() {
        let output = BalanceOutput {
            balance: 3_000_000_000_000,
            unlocked_balance: 2_000_000_000_000,
        };
        let human = output.render(OutputFormat::Human);
        assert!(human.contains("Balance"));
        assert!(human.contains("2.000000000000 XMR"));
    }

    #[test]
    fn test_convert_output_json() {
        let output = ConvertOutput {
            amount: 80.0,
            currency: "USD".into(),
            price_xmr: 0.5,
        };
        let json = output.render(OutputFormat::Json);
        assert!(json.contains("\"price_xmr\": 0.5"));
    }
}
