//! In-memory oracle collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::adapter::pyth::{MIN_ACCOUNT_LEN, PYTH_MAGIC};
use crate::domain::{Address, OracleFeed, OraclePrice};
use crate::error::{Error, Result};
use crate::port::{AccountFetcher, Clock, PriceOracle};

/// Serves readings keyed by feed address.
///
/// Prices can be replaced between calls to simulate a moving market.
#[derive(Default)]
pub struct StaticOracle {
    prices: RwLock<HashMap<Address, OraclePrice>>,
    calls: AtomicUsize,
}

impl StaticOracle {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_price(self, price: OraclePrice) -> Self {
        self.set_price(price);
        self
    }

    /// Insert or replace the reading for `price.feed`.
    pub fn set_price(&self, price: OraclePrice) {
        self.prices.write().insert(price.feed.clone(), price);
    }

    /// Number of `price` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for StaticOracle {
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .read()
            .get(&feed.address)
            .cloned()
            .ok_or_else(|| Error::account_parse(format!("no price for feed {}", feed.address)))
    }
}

/// Raw account bytes keyed by address.
#[derive(Default)]
pub struct StaticAccounts {
    accounts: HashMap<Address, Vec<u8>>,
}

impl StaticAccounts {
    #[must_use]
    pub fn with_account(mut self, address: &str, data: Vec<u8>) -> Self {
        self.accounts.insert(Address::from(address), data);
        self
    }
}

#[async_trait]
impl AccountFetcher for StaticAccounts {
    async fn fetch(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        Ok(self.accounts.get(address).cloned())
    }
}

/// A clock stopped at the given unix second.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix_secs(&self) -> i64 {
        self.0
    }
}

/// Encode a minimal Pyth price account.
pub fn pyth_account(
    price: i64,
    confidence: u64,
    exponent: i32,
    publish_time: i64,
    status: u32,
    publish_slot: u64,
) -> Vec<u8> {
    let mut data = vec![0u8; MIN_ACCOUNT_LEN];
    data[0..4].copy_from_slice(&PYTH_MAGIC.to_le_bytes());
    data[20..24].copy_from_slice(&exponent.to_le_bytes());
    data[96..104].copy_from_slice(&publish_time.to_le_bytes());
    data[208..216].copy_from_slice(&price.to_le_bytes());
    data[216..224].copy_from_slice(&confidence.to_le_bytes());
    data[224..228].copy_from_slice(&status.to_le_bytes());
    data[232..240].copy_from_slice(&publish_slot.to_le_bytes());
    data
}
