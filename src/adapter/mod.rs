//! Port implementations.
//!
//! - [`pyth`] - Pyth price-account decoding over an [`AccountFetcher`](crate::port::AccountFetcher)
//! - [`switchboard`] - Switchboard feeds with an application-supplied decoder
//! - [`router`] - Per-kind dispatch across oracles
//! - [`snapshot`] - Offline TOML snapshot serving every read port

pub mod pyth;
pub mod router;
pub mod snapshot;
pub mod switchboard;

pub use pyth::{decode_price_account, PythOracle};
pub use router::OracleRouter;
pub use snapshot::{Snapshot, SnapshotYieldSource};
pub use switchboard::{DecodedAggregator, SwitchboardDecoder, SwitchboardOracle};
