use std::io::Write;

use tempfile::NamedTempFile;

/// Capture time used by [`SNAPSHOT`].
pub const CAPTURED_AT: i64 = 1_700_000_000;

/// A snapshot with USDC/SOL prices, two vaults and three USDC yield sources.
pub const SNAPSHOT: &str = r#"
captured_at = 1700000000

[[prices]]
asset = "USDC"
kind = "pyth"
feed = "usdc-feed"
price = 100000000
confidence = 10000
exponent = -8
publish_time = 1699999995
status = "trading"

[[prices]]
asset = "SOL"
kind = "pyth"
feed = "sol-feed"
price = 2000000000
confidence = 1000000
exponent = -8
publish_time = 1699999990
status = "trading"

[[prices]]
asset = "STALE"
kind = "switchboard"
feed = "stale-feed"
price = 500
exponent = -2
publish_time = 1699990000

[[vaults]]
id = "usdc-core"
asset = "USDC"
total_assets = "2000000"
total_shares = "1000000"
capacity_assets = "3000000"
utilization_bps = 4200

[[vaults]]
id = "empty"
asset = "SOL"
total_assets = "0"
total_shares = "0"

[[positions]]
vault = "usdc-core"
owner = "alice"
shares = "1000"

[[yield_sources]]
id = "lend-a"
asset = "USDC"
apr_bps = 500
liquidity_usd = 1000000

[[yield_sources]]
id = "lend-b"
asset = "USDC"
apr_bps = 300
liquidity_usd = 500000

[[yield_sources]]
id = "thin"
asset = "USDC"
apr_bps = 2000
liquidity_usd = 10
"#;

/// Write `contents` to a temporary `.toml` file kept alive by the handle.
pub fn write_temp_toml(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("laserium-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
