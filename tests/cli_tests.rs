//! End-to-end runs of the `laserium` binary against a snapshot file.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use support::fixtures::{write_temp_toml, SNAPSHOT};
use tempfile::NamedTempFile;

fn laserium(snapshot: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("laserium").unwrap();
    cmd.env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .arg("--snapshot")
        .arg(snapshot.path());
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn quote_json_reports_amounts_and_oracle() {
    let snapshot = write_temp_toml(SNAPSHOT);
    let out = json_output(laserium(&snapshot).args([
        "quote", "--from", "USDC", "--to", "SOL", "--amount", "1000000",
    ]));

    let quote = &out["quote"];
    assert_eq!(out["command"], "quote");
    assert_eq!(quote["in_amount"], "1000000");
    assert_eq!(quote["out_amount"], "19920060");
    assert_eq!(quote["min_out_amount"], "19820459");
    assert_eq!(quote["fee_bps"], 30);
    assert_eq!(quote["spread_bps"], 10);
    assert_eq!(quote["slippage_bps"], 50);
    assert_eq!(quote["oracle"]["feed"], "sol-feed");
    assert_eq!(quote["oracle"]["kind"], "pyth");
}

#[test]
fn quote_overrides_apply() {
    let snapshot = write_temp_toml(SNAPSHOT);
    let out = json_output(laserium(&snapshot).args([
        "quote",
        "--from",
        "USDC",
        "--to",
        "SOL",
        "--amount",
        "1000000",
        "--fee-bps",
        "0",
        "--spread-bps",
        "0",
        "--slippage-bps",
        "100",
    ]));
    assert_eq!(out["quote"]["out_amount"], "20000000");
    assert_eq!(out["quote"]["min_out_amount"], "19800000");
}

#[test]
fn quote_human_output_lists_fields() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["quote", "--from", "USDC", "--to", "SOL", "--amount", "1000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Swap quote"))
        .stdout(predicate::str::contains("19920060"))
        .stdout(predicate::str::contains("sol-feed"));
}

#[test]
fn stale_price_fails_the_quote() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["quote", "--from", "USDC", "--to", "STALE", "--amount", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OraclePriceStale"));
}

#[test]
fn out_of_range_slippage_fails() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args([
            "quote",
            "--from",
            "USDC",
            "--to",
            "SOL",
            "--amount",
            "10",
            "--slippage-bps",
            "10001",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidArgument"));
}

#[test]
fn deposit_and_withdraw_previews() {
    let snapshot = write_temp_toml(SNAPSHOT);

    let out = json_output(laserium(&snapshot).args([
        "deposit",
        "--vault",
        "usdc-core",
        "--amount",
        "500",
    ]));
    assert_eq!(out["shares"], "250");

    let out = json_output(laserium(&snapshot).args([
        "withdraw",
        "--vault",
        "usdc-core",
        "--shares",
        "1000",
    ]));
    assert_eq!(out["assets"], "2000");
}

#[test]
fn deposit_over_capacity_fails() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["deposit", "--vault", "usdc-core", "--amount", "1000001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VaultCapacityExceeded"));
}

#[test]
fn withdraw_from_empty_vault_is_insolvent() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["withdraw", "--vault", "empty", "--shares", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VaultInsolvent"));
}

#[test]
fn vault_reports_tvl_apr_and_position() {
    let snapshot = write_temp_toml(SNAPSHOT);
    let out = json_output(laserium(&snapshot).args([
        "vault",
        "--vault",
        "usdc-core",
        "--owner",
        "alice",
    ]));

    assert_eq!(out["tvl"], "2000000");
    assert_eq!(out["vault"]["utilization_bps"], 4200);
    // 500 * 1785 + 300 * 1071 + 2000 * 7144, over 10000
    assert_eq!(out["apr_bps"], 1550);
    assert_eq!(out["position"]["value"], "2000");
}

#[test]
fn vault_without_yield_sources_warns_about_apr() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["vault", "--vault", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APR unavailable"));
}

#[test]
fn allocate_honors_liquidity_floor_from_config() {
    let snapshot = write_temp_toml(SNAPSHOT);
    let config = write_temp_toml("[yield_router]\nmin_liquidity_usd = 1000");

    let out = json_output(
        laserium(&snapshot)
            .arg("--config")
            .arg(config.path())
            .args(["allocate", "--asset", "USDC"]),
    );

    let allocations = out["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["source"], "lend-a");
    assert_eq!(allocations[0]["weight_bps"], 6250);
    assert_eq!(allocations[1]["source"], "lend-b");
    assert_eq!(allocations[1]["weight_bps"], 3750);
    assert_eq!(out["apr_bps"], 425);
}

#[test]
fn allocate_for_unknown_asset_fails() {
    let snapshot = write_temp_toml(SNAPSHOT);
    laserium(&snapshot)
        .args(["allocate", "--asset", "BONK"])
        .assert()
        .failure();
}

#[test]
fn missing_snapshot_is_reported() {
    Command::cargo_bin("laserium")
        .unwrap()
        .env("NO_COLOR", "1")
        .args(["deposit", "--vault", "usdc-core", "--amount", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--snapshot"));
}

#[test]
fn invalid_config_is_reported() {
    let snapshot = write_temp_toml(SNAPSHOT);
    let config = write_temp_toml("[swap]\nfee_bps = 20000");
    laserium(&snapshot)
        .arg("--config")
        .arg(config.path())
        .args(["deposit", "--vault", "usdc-core", "--amount", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("swap.fee_bps"));
}
