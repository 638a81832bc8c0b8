//! Configuration sections and the top-level [`Config`].

mod logging;
mod oracle;
mod settings;
mod swap;
mod yield_router;

pub use logging::LoggingConfig;
pub use oracle::{FeedEntry, OracleSection};
pub use settings::Config;
pub use swap::SwapSection;
pub use yield_router::YieldRouterSection;
