//! Command-line interface definitions.
//!
//! The `laserium` binary previews engine results against a captured ledger
//! snapshot. It never signs or submits anything.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{to_scaled_amount, ScaledAmount};

/// Deterministic vault pricing and accounting previews
#[derive(Parser, Debug)]
#[command(name = "laserium")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a TOML ledger snapshot
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the laserium CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quote a swap between two assets
    Quote(QuoteArgs),

    /// Preview the shares minted by a deposit
    Deposit(DepositArgs),

    /// Preview the assets released by a withdrawal
    Withdraw(WithdrawArgs),

    /// Show vault state, TVL and APR
    Vault(VaultArgs),

    /// Show the optimal yield allocation for an asset
    Allocate(AllocateArgs),
}

/// Arguments for `laserium quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Asset to swap from
    #[arg(long)]
    pub from: String,

    /// Asset to swap to
    #[arg(long)]
    pub to: String,

    /// Input amount in the source asset's smallest unit
    #[arg(long, value_parser = parse_amount)]
    pub amount: ScaledAmount,

    /// Slippage tolerance override, in bps
    #[arg(long, allow_negative_numbers = true)]
    pub slippage_bps: Option<i64>,

    /// Protocol fee override, in bps
    #[arg(long, allow_negative_numbers = true)]
    pub fee_bps: Option<i64>,

    /// Spread override, in bps
    #[arg(long, allow_negative_numbers = true)]
    pub spread_bps: Option<i64>,
}

/// Arguments for `laserium deposit`.
#[derive(Args, Debug)]
pub struct DepositArgs {
    /// Vault identifier
    #[arg(long)]
    pub vault: String,

    /// Deposit amount in the vault asset's smallest unit
    #[arg(long, value_parser = parse_amount)]
    pub amount: ScaledAmount,
}

/// Arguments for `laserium withdraw`.
#[derive(Args, Debug)]
pub struct WithdrawArgs {
    /// Vault identifier
    #[arg(long)]
    pub vault: String,

    /// Shares to burn
    #[arg(long, value_parser = parse_amount)]
    pub shares: ScaledAmount,
}

/// Arguments for `laserium vault`.
#[derive(Args, Debug)]
pub struct VaultArgs {
    /// Vault identifier
    #[arg(long)]
    pub vault: String,

    /// Also show the value of this owner's position
    #[arg(long)]
    pub owner: Option<String>,
}

/// Arguments for `laserium allocate`.
#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Asset to route
    #[arg(long)]
    pub asset: String,
}

fn parse_amount(value: &str) -> Result<ScaledAmount, String> {
    to_scaled_amount(value).map_err(|e| e.to_string())
}
