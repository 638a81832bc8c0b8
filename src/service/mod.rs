//! Services wiring the pure domain to ports.
//!
//! Each service holds its collaborators as `Arc<dyn Port>` and re-reads
//! external state on every call. Logging happens here, never in the domain.

mod oracle;
mod swap;
mod vault;
mod yield_router;

pub use oracle::{OracleAdapter, OracleConfig};
pub use swap::{QuoteParams, SwapConfig, SwapService};
pub use vault::VaultService;
pub use yield_router::{YieldRouter, YieldRouterConfig};
