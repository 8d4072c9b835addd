//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// xmrpay CLI.
#[derive(Parser, Debug)]
#[command(name = "xmrpay")]
#[command(author = "XMRPay Contributors")]
#[command(version)]
#[command(about = "Merchant-side Monero payment tooling")]
#[command(
    long_about = "Allocate receiving subaddresses, price orders in XMR, and check whether a payment has arrived, against a running monero-wallet-rpc."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate a receiving subaddress for a payer.
    ///
    /// Reuses a previously issued token when it is still well formed;
    /// derives and persists a fresh subaddress otherwise.
    Address {
        /// Previously issued address token to reuse.
        #[arg(long)]
        reuse: Option<String>,
    },

    /// Convert an order total into XMR at the current exchange rate.
    Convert {
        /// Amount in the quoted currency.
        amount: f64,

        /// Currency code (USD, EUR, CAD, GBP, INR, or XMR).
        #[arg(default_value = "USD")]
        currency: String,
    },

    /// Check whether a payment has arrived at an address.
    Verify {
        /// Receiving address to check.
        address: String,

        /// Expected amount.
        amount: f64,

        /// Currency the amount is quoted in.
        #[arg(long, default_value = "XMR")]
        currency: String,

        /// Required confirmations (overrides the configured default).
        #[arg(long)]
        confirmations: Option<u64>,

        /// Keep polling until the payment arrives.
        #[arg(long)]
        watch: bool,
    },

    /// Show the wallet balance.
    Balance,

    /// Show the wallet blockchain height.
    Height,
}
