//! # CLI Interface
//!
//! Defines the command-line argument structure for the `covenant` binary
//! using `clap` derive. Supports four subcommands: `pack`, `unpack`,
//! `encode-order`, and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Covenant operator tooling.
///
/// Packs and unpacks the 32-byte terms words stored by the collateralized
/// terms contract, and encodes caller-level loan orders against a token
/// registry snapshot. No ledger connection is made; everything runs
/// offline against the wire formats.
#[derive(Parser, Debug)]
#[command(
    name = "covenant",
    about = "Covenant loan-terms tooling",
    version,
    propagate_version = true
)]
pub struct CovenantCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, env = "COVENANT_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the covenant binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack collateral terms into the on-chain 32-byte word.
    Pack(PackArgs),
    /// Unpack a 32-byte terms word into its parameter triple.
    Unpack(UnpackArgs),
    /// Encode a loan order (JSON) against a registry snapshot (JSON).
    EncodeOrder(EncodeOrderArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `pack` subcommand.
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Registry index of the collateral token (0-255).
    #[arg(long)]
    pub token_index: u32,

    /// Collateral amount in the token's base units. Decimal string; must be
    /// integral and below 2^92.
    #[arg(long)]
    pub amount: String,

    /// Grace period in days (0-255).
    #[arg(long)]
    pub grace_period: u32,
}

/// Arguments for the `unpack` subcommand.
#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// The packed word: 0x followed by 64 hex digits.
    pub word: String,
}

/// Arguments for the `encode-order` subcommand.
#[derive(Parser, Debug)]
pub struct EncodeOrderArgs {
    /// Path to the loan order JSON file.
    pub order: PathBuf,

    /// Path to the token registry snapshot (JSON array of entries).
    #[arg(long, short = 'r', env = "COVENANT_REGISTRY")]
    pub registry: PathBuf,
}
