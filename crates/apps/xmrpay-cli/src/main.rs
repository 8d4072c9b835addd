//! xmrpay command-line entry point.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::CliConfig;
use error::CliResult;
use output::OutputFormat;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = OutputFormat::from(cli.format);
    match run(cli, format).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, format: OutputFormat) -> CliResult<String> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::load_default()?,
    };

    match cli.command {
        Commands::Address { reuse } => commands::address::address(config, reuse, format).await,
        Commands::Convert { amount, currency } => {
            commands::convert::convert(config, amount, &currency, format).await
        }
        Commands::Verify {
            address,
            amount,
            currency,
            confirmations,
            watch,
        } => {
            commands::verify::verify(
                config,
                address,
                amount,
                &currency,
                confirmations,
                watch,
                format,
            )
            .await
        }
        Commands::Balance => commands::balance::balance(config, format).await,
        Commands::Height => commands::height::height(config, format).await,
    }
}
