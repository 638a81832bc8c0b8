//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct aggregating every section. Configuration
//! is loaded from a TOML file; every section and field has a default, so an
//! empty file is valid.
//!
//! # Example
//!
//! ```no_run
//! use laserium::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("laserium.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::oracle::OracleSection;
use super::swap::SwapSection;
use super::yield_router::YieldRouterSection;
use crate::domain::{BasisPoints, BPS_DENOMINATOR};
use crate::error::ConfigError;

type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Oracle acceptance policy and USD feeds.
    #[serde(default)]
    pub oracle: OracleSection,

    /// Default swap pricing.
    #[serde(default)]
    pub swap: SwapSection,

    /// Yield routing parameters.
    #[serde(default)]
    pub yield_router: YieldRouterSection,
}

impl Config {
    /// Parse and validate TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] or [`ConfigError::MissingField`] when a
    /// value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] if the file cannot be read, otherwise
    /// see [`Config::parse_toml`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section; see [`LoggingConfig::init`].
    pub fn init_logging(&self) -> bool {
        self.logging.init()
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            });
        }

        if self.oracle.max_age_secs < 0 {
            return Err(ConfigError::InvalidValue {
                field: "oracle.max_age_secs",
                reason: "must be >= 0".into(),
            });
        }
        check_bps("oracle.max_confidence_bps", self.oracle.max_confidence_bps)?;
        for (asset, feed) in &self.oracle.feeds {
            if asset.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "oracle.feeds",
                    reason: "asset name must not be empty".into(),
                });
            }
            if feed.address.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "oracle.feeds.address",
                });
            }
        }

        check_bps("swap.fee_bps", self.swap.fee_bps)?;
        check_bps("swap.spread_bps", self.swap.spread_bps)?;
        check_bps("swap.slippage_bps", self.swap.slippage_bps)?;

        if self.yield_router.risk_penalty_bps_per_point < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "yield_router.risk_penalty_bps_per_point",
                reason: "must be >= 0".into(),
            });
        }
        if self.yield_router.min_liquidity_usd < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "yield_router.min_liquidity_usd",
                reason: "must be >= 0".into(),
            });
        }
        if let Some(cap) = self.yield_router.max_single_source_bps {
            check_bps("yield_router.max_single_source_bps", cap)?;
        }

        Ok(())
    }
}

fn check_bps(field: &'static str, value: BasisPoints) -> Result<()> {
    if value > BPS_DENOMINATOR {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is outside [0, {BPS_DENOMINATOR}]"),
        });
    }
    Ok(())
}
