// Copyright (c) 2026 Covenant Labs. MIT License.
// See LICENSE for details.

//! # Covenant CLI
//!
//! Entry point for the `covenant` binary. Parses CLI arguments, initializes
//! logging, and dispatches to the offline loan-terms tooling.
//!
//! The binary supports four subcommands:
//!
//! - `pack`         — pack collateral terms into a 32-byte word
//! - `unpack`       — unpack a word into its parameter triple
//! - `encode-order` — encode a loan order JSON against a registry snapshot
//! - `version`      — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use covenant_client::{
    pack_parameters, unpack_parameters, CollateralizedLoanTermsAdapter,
    CollateralizedSimpleInterestLoanOrder, CollateralizedTermsContractParameters,
    InMemoryTokenRegistry, TokenEntry,
};

use cli::{Commands, CovenantCli, EncodeOrderArgs, PackArgs, UnpackArgs};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CovenantCli::parse();
    logging::init_logging("covenant=info", LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Pack(args) => pack(args),
        Commands::Unpack(args) => unpack(args),
        Commands::EncodeOrder(args) => encode_order(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Packs a parameter triple given on the command line.
fn pack(args: PackArgs) -> Result<()> {
    let amount = Decimal::from_str(&args.amount)
        .with_context(|| format!("{:?} is not a decimal amount", args.amount))?;
    let params =
        CollateralizedTermsContractParameters::new(args.token_index, amount, args.grace_period);

    let word = pack_parameters(&params).context("terms failed validation")?;
    println!("{word}");
    Ok(())
}

/// Unpacks a wire-format word and prints the triple as JSON.
fn unpack(args: UnpackArgs) -> Result<()> {
    let params = unpack_parameters(&args.word).context("malformed packed word")?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

/// Encodes a loan order file against a registry snapshot.
async fn encode_order(args: EncodeOrderArgs) -> Result<()> {
    let registry_json = std::fs::read_to_string(&args.registry)
        .with_context(|| format!("cannot read registry snapshot {}", args.registry.display()))?;
    let entries: Vec<TokenEntry> =
        serde_json::from_str(&registry_json).context("registry snapshot is not a JSON array")?;
    info!(tokens = entries.len(), "loaded registry snapshot");

    let order_json = std::fs::read_to_string(&args.order)
        .with_context(|| format!("cannot read loan order {}", args.order.display()))?;
    let order: CollateralizedSimpleInterestLoanOrder =
        serde_json::from_str(&order_json).context("loan order does not parse")?;

    let registry = Arc::new(InMemoryTokenRegistry::from_entries(entries));
    let adapter = CollateralizedLoanTermsAdapter::new(registry);

    let params = adapter.from_loan_order(&order).await?;
    let word = pack_parameters(&params)?;

    info!(
        collateral = %order.collateral_token_symbol,
        "loan order encoded"
    );
    println!("{}", serde_json::to_string_pretty(&params)?);
    println!("{word}");
    Ok(())
}

fn print_version() {
    println!("covenant {}", env!("CARGO_PKG_VERSION"));
}
