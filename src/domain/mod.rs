//! Pure pricing and accounting logic.
//!
//! Nothing in this module performs I/O, holds state between calls, or logs.
//! Every operation takes explicit inputs and returns a value or a typed
//! [`Error`](crate::error::Error).

pub mod allocation;
pub mod cross_rate;
pub mod id;
pub mod math;
pub mod money;
pub mod oracle;
pub mod quote;
pub mod vault;

pub use allocation::{
    allocate, weighted_apr_bps, AllocationPolicy, YieldAllocation, YieldSourceMetrics,
};
pub use cross_rate::{cross_rate, CrossRate};
pub use id::{Address, AssetId, SourceId, VaultId};
pub use math::{apply_bps, bps_of, clamp_bps, mul_div, pow10, Rounding};
pub use money::{to_scaled_amount, BasisPoints, ScaledAmount, BPS_DENOMINATOR};
pub use oracle::{OracleFeed, OracleKind, OraclePolicy, OraclePrice, PriceStatus};
pub use quote::{ensure_executable, OracleSnapshot, QuoteRequest, SwapQuote};
pub use vault::{
    preview_deposit, preview_withdraw, validate_state, PositionState, VaultAggregateState,
    VaultSnapshot,
};
