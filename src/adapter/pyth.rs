//! Pyth price-account adapter.
//!
//! Decodes the fixed legacy price-account layout. Offsets are little-endian:
//!
//! | offset | field                  | type |
//! |--------|------------------------|------|
//! | 0      | magic (`0xa1b2c3d4`)   | u32  |
//! | 20     | exponent               | i32  |
//! | 96     | publish time           | i64  |
//! | 208    | aggregate price        | i64  |
//! | 216    | aggregate confidence   | u64  |
//! | 224    | aggregate status       | u32  |
//! | 232    | aggregate publish slot | u64  |

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Address, OracleFeed, OracleKind, OraclePrice, PriceStatus};
use crate::error::{Error, Result};
use crate::port::{AccountFetcher, PriceOracle};

pub const PYTH_MAGIC: u32 = 0xa1b2_c3d4;

/// Smallest account that holds every field read by [`decode_price_account`].
pub const MIN_ACCOUNT_LEN: usize = 240;

const EXPONENT_OFFSET: usize = 20;
const PUBLISH_TIME_OFFSET: usize = 96;
const AGGREGATE_OFFSET: usize = 208;

/// Decode a raw Pyth price account.
///
/// # Errors
///
/// Returns `AccountParseError` if the data is too short or the magic number
/// does not match.
pub fn decode_price_account(feed: &Address, data: &[u8]) -> Result<OraclePrice> {
    if data.len() < MIN_ACCOUNT_LEN {
        return Err(Error::account_parse(format!(
            "pyth account {feed} too small: {} bytes, need {MIN_ACCOUNT_LEN}",
            data.len()
        )));
    }

    let magic = read_u32(data, 0)?;
    if magic != PYTH_MAGIC {
        return Err(Error::account_parse(format!(
            "pyth account {feed} has bad magic {magic:#010x}"
        )));
    }

    let exponent = read_i32(data, EXPONENT_OFFSET)?;
    let publish_time = read_i64(data, PUBLISH_TIME_OFFSET)?;
    let price = read_i64(data, AGGREGATE_OFFSET)?;
    let confidence = read_u64(data, AGGREGATE_OFFSET + 8)?;
    let status = status_from_code(read_u32(data, AGGREGATE_OFFSET + 16)?);
    let publish_slot = read_u64(data, AGGREGATE_OFFSET + 24)?;

    Ok(OraclePrice {
        kind: OracleKind::Pyth,
        feed: feed.clone(),
        price,
        confidence,
        exponent,
        publish_time,
        publish_slot,
        status,
    })
}

const fn status_from_code(code: u32) -> PriceStatus {
    match code {
        1 => PriceStatus::Trading,
        2 => PriceStatus::Halted,
        3 => PriceStatus::Auction,
        4 => PriceStatus::Ignored,
        _ => PriceStatus::Unknown,
    }
}

fn field<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| Error::account_parse(format!("pyth field at offset {offset} out of bounds")))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    field(data, offset).map(u32::from_le_bytes)
}

fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    field(data, offset).map(i32::from_le_bytes)
}

fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    field(data, offset).map(u64::from_le_bytes)
}

fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    field(data, offset).map(i64::from_le_bytes)
}

/// [`PriceOracle`] reading Pyth accounts through an [`AccountFetcher`].
pub struct PythOracle {
    fetcher: Arc<dyn AccountFetcher>,
}

impl PythOracle {
    pub fn new(fetcher: Arc<dyn AccountFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PriceOracle for PythOracle {
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice> {
        if feed.kind != OracleKind::Pyth {
            return Err(Error::invalid_argument(format!(
                "pyth oracle cannot read {} feed {}",
                feed.kind, feed.address
            )));
        }

        let data = self
            .fetcher
            .fetch(&feed.address)
            .await?
            .ok_or_else(|| Error::account_parse(format!("pyth account {} not found", feed.address)))?;

        let price = decode_price_account(&feed.address, &data)?;
        debug!(
            feed = %feed.address,
            price = price.price,
            exponent = price.exponent,
            publish_time = price.publish_time,
            "Decoded pyth price"
        );
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::oracle::{pyth_account, StaticAccounts};

    fn feed() -> Address {
        Address::from("pyth-sol")
    }

    #[test]
    fn decodes_all_fields() {
        let data = pyth_account(15_000_000_000, 1_500_000, -8, 1_700_000_000, 1, 42);
        let price = decode_price_account(&feed(), &data).unwrap();

        assert_eq!(price.kind, OracleKind::Pyth);
        assert_eq!(price.feed, feed());
        assert_eq!(price.price, 15_000_000_000);
        assert_eq!(price.confidence, 1_500_000);
        assert_eq!(price.exponent, -8);
        assert_eq!(price.publish_time, 1_700_000_000);
        assert_eq!(price.publish_slot, 42);
        assert_eq!(price.status, PriceStatus::Trading);
    }

    #[test]
    fn maps_status_codes() {
        let cases = [
            (0, PriceStatus::Unknown),
            (1, PriceStatus::Trading),
            (2, PriceStatus::Halted),
            (3, PriceStatus::Auction),
            (4, PriceStatus::Ignored),
            (99, PriceStatus::Unknown),
        ];
        for (code, expected) in cases {
            let data = pyth_account(1, 0, 0, 0, code, 0);
            assert_eq!(decode_price_account(&feed(), &data).unwrap().status, expected);
        }
    }

    #[test]
    fn short_account_is_rejected() {
        let data = pyth_account(1, 0, 0, 0, 1, 0);
        let err = decode_price_account(&feed(), &data[..MIN_ACCOUNT_LEN - 1]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::AccountParseError);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut data = pyth_account(1, 0, 0, 0, 1, 0);
        data[0] = 0;
        let err = decode_price_account(&feed(), &data).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::AccountParseError);
    }

    #[tokio::test]
    async fn oracle_fetches_and_decodes() {
        let accounts = StaticAccounts::default()
            .with_account("pyth-sol", pyth_account(42, 1, -2, 100, 1, 7));
        let oracle = PythOracle::new(Arc::new(accounts));

        let price = oracle
            .price(&OracleFeed::new(OracleKind::Pyth, "pyth-sol"))
            .await
            .unwrap();
        assert_eq!(price.price, 42);
        assert_eq!(price.exponent, -2);
    }

    #[tokio::test]
    async fn oracle_rejects_missing_account_and_foreign_feed() {
        let oracle = PythOracle::new(Arc::new(StaticAccounts::default()));

        let err = oracle
            .price(&OracleFeed::new(OracleKind::Pyth, "missing"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::AccountParseError);

        let err = oracle
            .price(&OracleFeed::new(OracleKind::Switchboard, "sb"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    }
}
