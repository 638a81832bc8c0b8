//! Command handlers.
//!
//! Every command loads the snapshot, wires it into the services as oracle,
//! vault reader, yield sources and clock, runs one engine operation and prints
//! the result.

use std::path::Path;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use serde_json::json;

use super::command::{AllocateArgs, Cli, Commands, DepositArgs, QuoteArgs, VaultArgs, WithdrawArgs};
use super::diagnostic::{ConfigDiagnostic, EngineDiagnostic};
use super::output::{allocation_json, percent, quote_json, vault_json, Output};
use crate::adapter::Snapshot;
use crate::config::Config;
use crate::domain::{weighted_apr_bps, Address, AssetId, VaultId};
use crate::error::{ConfigError, Error};
use crate::service::{
    OracleAdapter, OracleConfig, QuoteParams, SwapConfig, SwapService, VaultService, YieldRouter,
    YieldRouterConfig,
};

/// Load configuration, initialize logging and run the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    config.init_logging();

    let snapshot = Arc::new(load_snapshot(cli.snapshot.as_deref())?);
    let output = Output::new(cli.json);
    let engine = Engine::new(&config, snapshot);

    let result = match cli.command {
        Commands::Quote(args) => engine.quote(args, output).await,
        Commands::Deposit(args) => engine.deposit(args, output).await,
        Commands::Withdraw(args) => engine.withdraw(args, output).await,
        Commands::Vault(args) => engine.vault(args, output).await,
        Commands::Allocate(args) => engine.allocate(args, output).await,
    };
    result.map_err(|e| EngineDiagnostic::from(e).into())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(ConfigError::ReadFile)
        .into_diagnostic()?;
    Config::parse_toml(&content).map_err(|e| ConfigDiagnostic::new(&e, content).into())
}

fn load_snapshot(path: Option<&Path>) -> Result<Snapshot> {
    let path = path.ok_or_else(|| {
        EngineDiagnostic::from(Error::not_configured("a ledger snapshot is required (--snapshot)"))
    })?;
    Snapshot::load(path).map_err(|e| EngineDiagnostic::from(e).into())
}

/// Services wired to one snapshot.
struct Engine {
    snapshot: Arc<Snapshot>,
    swaps: SwapService,
    router_config: YieldRouterConfig,
}

impl Engine {
    fn new(config: &Config, snapshot: Arc<Snapshot>) -> Self {
        let mut oracle_config = OracleConfig::from(&config.oracle);
        for (asset, feed) in snapshot.usd_feeds() {
            oracle_config
                .usd_feeds
                .entry(asset.clone())
                .or_insert_with(|| feed.clone());
        }

        let oracle = Arc::new(OracleAdapter::new(
            snapshot.clone(),
            snapshot.clone(),
            oracle_config,
        ));
        let swaps = SwapService::new(oracle, SwapConfig::from(&config.swap));

        Self {
            snapshot,
            swaps,
            router_config: YieldRouterConfig::from(&config.yield_router),
        }
    }

    fn vaults(&self) -> VaultService {
        VaultService::new(self.snapshot.clone())
    }

    fn router(&self, asset: &AssetId) -> Result<YieldRouter, Error> {
        YieldRouter::new(self.snapshot.yield_sources_for(asset), self.router_config)
    }

    async fn quote(&self, args: QuoteArgs, output: Output) -> Result<(), Error> {
        let params = QuoteParams {
            from: AssetId::new(args.from),
            to: AssetId::new(args.to),
            amount_in: args.amount,
            slippage_bps: args.slippage_bps,
            fee_bps: args.fee_bps,
            spread_bps: args.spread_bps,
        };
        let quote = self.swaps.simulate(&params).await?;

        output.emit(&json!({ "command": "quote", "quote": quote_json(&quote) }));
        output.header(env!("CARGO_PKG_VERSION"));
        output.section("Swap quote");
        output.field("From", &quote.from_asset);
        output.field("To", &quote.to_asset);
        output.field("Amount in", quote.in_amount);
        output.field("Amount out", quote.out_amount);
        output.field("Minimum out", quote.min_out_amount);
        output.field("Rate", format!("{}e{}", quote.price, quote.price_exponent));
        output.field("Spread", percent(quote.spread_bps));
        output.field("Fee", percent(quote.fee_bps));
        output.field("Slippage", percent(quote.slippage_bps));
        output.section("Oracle");
        output.field("Kind", quote.oracle.kind);
        output.field("Feed", &quote.oracle.feed);
        output.field("Published", quote.oracle.publish_time);
        output.field("Confidence", quote.oracle.confidence);
        Ok(())
    }

    async fn deposit(&self, args: DepositArgs, output: Output) -> Result<(), Error> {
        let vault_id = VaultId::new(args.vault);
        let shares = self.vaults().preview_deposit(&vault_id, args.amount).await?;

        output.emit(&json!({
            "command": "deposit",
            "vault": vault_id,
            "assets": args.amount.to_string(),
            "shares": shares.to_string(),
        }));
        output.header(env!("CARGO_PKG_VERSION"));
        output.section("Deposit preview");
        output.field("Vault", &vault_id);
        output.field("Assets in", args.amount);
        output.field("Shares minted", shares);
        Ok(())
    }

    async fn withdraw(&self, args: WithdrawArgs, output: Output) -> Result<(), Error> {
        let vault_id = VaultId::new(args.vault);
        let assets = self.vaults().preview_withdraw(&vault_id, args.shares).await?;

        output.emit(&json!({
            "command": "withdraw",
            "vault": vault_id,
            "shares": args.shares.to_string(),
            "assets": assets.to_string(),
        }));
        output.header(env!("CARGO_PKG_VERSION"));
        output.section("Withdraw preview");
        output.field("Vault", &vault_id);
        output.field("Shares burned", args.shares);
        output.field("Assets out", assets);
        Ok(())
    }

    async fn vault(&self, args: VaultArgs, output: Output) -> Result<(), Error> {
        let vault_id = VaultId::new(args.vault);
        let mut vaults = self.vaults();
        let snapshot = vaults.state(&vault_id).await?;
        let tvl = vaults.tvl(&vault_id).await?;

        if let Ok(router) = self.router(&snapshot.asset) {
            vaults = vaults.with_yield_router(Arc::new(router));
        }
        let apr = vaults.apr_bps(&vault_id).await;

        let position = match &args.owner {
            Some(owner) => {
                let owner = Address::new(owner.clone());
                let value = vaults.position_value(&vault_id, &owner).await?;
                Some((owner, value))
            }
            None => None,
        };

        output.emit(&json!({
            "command": "vault",
            "vault": vault_json(&snapshot),
            "tvl": tvl.to_string(),
            "apr_bps": apr.as_ref().ok(),
            "position": position.as_ref().map(|(owner, value)| json!({
                "owner": owner,
                "value": value.to_string(),
            })),
        }));
        output.header(env!("CARGO_PKG_VERSION"));
        output.section("Vault");
        output.field("Id", &snapshot.vault_id);
        output.field("Asset", &snapshot.asset);
        output.field("TVL", tvl);
        output.field("Total shares", snapshot.state.total_shares);
        if let Some(capacity) = snapshot.state.capacity_assets {
            output.field("Capacity", capacity);
        }
        if let Some(utilization) = snapshot.state.utilization_bps {
            output.field("Utilization", percent(utilization));
        }
        match &apr {
            Ok(apr) => output.field("APR", format!("{apr} bps")),
            Err(e) => output.warning(&format!("APR unavailable: {e}")),
        }
        if let Some((owner, value)) = &position {
            output.section("Position");
            output.field("Owner", owner);
            output.field("Value", value);
        }
        Ok(())
    }

    async fn allocate(&self, args: AllocateArgs, output: Output) -> Result<(), Error> {
        let asset = AssetId::new(args.asset);
        let route = self.router(&asset)?.optimal_route(&asset).await?;
        let apr = weighted_apr_bps(&route);

        output.emit(&json!({
            "command": "allocate",
            "asset": asset,
            "apr_bps": apr,
            "allocations": route.iter().map(allocation_json).collect::<Vec<_>>(),
        }));
        output.header(env!("CARGO_PKG_VERSION"));
        output.section(&format!("Yield route for {asset}"));
        for allocation in &route {
            output.field(
                allocation.source_id.as_str(),
                format!(
                    "{} ({} bps APR)",
                    percent(allocation.weight_bps),
                    allocation.metrics.apr_bps
                ),
            );
        }
        output.field("Weighted APR", format!("{apr} bps"));
        Ok(())
    }
}
