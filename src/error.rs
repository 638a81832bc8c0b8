//! Error types for the crate.
//!
//! Every failure the engine can produce is a variant of [`Error`]. Each variant
//! maps to a stable, machine-readable [`ErrorKind`] and carries the structured
//! details needed to diagnose it. Configuration-file problems are kept apart in
//! [`ConfigError`] since they never reach the pricing or accounting paths.

use std::fmt;

use thiserror::Error;

use crate::domain::money::ScaledAmount;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Stable machine-readable identifier for an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OraclePriceStale,
    OracleConfidenceTooWide,
    OracleAdapterUnavailable,
    InvalidSlippage,
    InvalidShareConversion,
    VaultCapacityExceeded,
    VaultInsolvent,
    UnauthorizedAuthority,
    ProgramNotConfigured,
    AccountParseError,
    InvariantViolation,
    InvalidArgument,
    TransactionBuildError,
}

/// How a caller is expected to react to an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller supplied a bad amount, bps value or identifier.
    CallerInput,
    /// Upstream data is too old, too uncertain, or could not be decoded.
    DataTrust,
    /// A vault rule rejected the operation.
    BusinessRule,
    /// An internal consistency check failed; indicates a bug or misconfiguration.
    Internal,
    /// A collaborator is missing, unauthorized, or failed to build a transaction.
    Integration,
}

impl ErrorKind {
    /// The kind's name as used in logs and JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OraclePriceStale => "OraclePriceStale",
            Self::OracleConfidenceTooWide => "OracleConfidenceTooWide",
            Self::OracleAdapterUnavailable => "OracleAdapterUnavailable",
            Self::InvalidSlippage => "InvalidSlippage",
            Self::InvalidShareConversion => "InvalidShareConversion",
            Self::VaultCapacityExceeded => "VaultCapacityExceeded",
            Self::VaultInsolvent => "VaultInsolvent",
            Self::UnauthorizedAuthority => "UnauthorizedAuthority",
            Self::ProgramNotConfigured => "ProgramNotConfigured",
            Self::AccountParseError => "AccountParseError",
            Self::InvariantViolation => "InvariantViolation",
            Self::InvalidArgument => "InvalidArgument",
            Self::TransactionBuildError => "TransactionBuildError",
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument | Self::InvalidSlippage => ErrorCategory::CallerInput,
            Self::OraclePriceStale | Self::OracleConfidenceTooWide | Self::AccountParseError => {
                ErrorCategory::DataTrust
            }
            Self::VaultCapacityExceeded | Self::VaultInsolvent | Self::InvalidShareConversion => {
                ErrorCategory::BusinessRule
            }
            Self::InvariantViolation => ErrorCategory::Internal,
            Self::OracleAdapterUnavailable
            | Self::UnauthorizedAuthority
            | Self::ProgramNotConfigured
            | Self::TransactionBuildError => ErrorCategory::Integration,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The crate-wide error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("oracle price for feed {feed} is stale: age {age_secs}s exceeds {max_age_secs}s")]
    OraclePriceStale {
        feed: String,
        age_secs: i64,
        max_age_secs: i64,
    },

    #[error("oracle confidence too wide: {reason}")]
    OracleConfidenceTooWide { reason: String },

    #[error("no oracle adapter registered for {kind} feeds")]
    OracleAdapterUnavailable { kind: String },

    #[error("invalid slippage: min out {min_out} exceeds quoted out {out}")]
    InvalidSlippage {
        min_out: ScaledAmount,
        out: ScaledAmount,
    },

    #[error("invalid share conversion: {reason}")]
    InvalidShareConversion { reason: String },

    #[error("deposit of {deposit} exceeds vault capacity {capacity} (total assets {total_assets})")]
    VaultCapacityExceeded {
        total_assets: ScaledAmount,
        deposit: ScaledAmount,
        capacity: ScaledAmount,
    },

    #[error("vault insolvent: {reason}")]
    VaultInsolvent { reason: String },

    #[error("unauthorized: {reason}")]
    UnauthorizedAuthority { reason: String },

    #[error("not configured: {reason}")]
    ProgramNotConfigured {
        reason: String,
        #[source]
        cause: Option<Box<Error>>,
    },

    #[error("account parse error: {reason}")]
    AccountParseError { reason: String },

    #[error("invariant violation: {reason}")]
    InvariantViolation { reason: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("failed to build transaction: {reason}")]
    TransactionBuildError { reason: String },
}

impl Error {
    /// The stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OraclePriceStale { .. } => ErrorKind::OraclePriceStale,
            Self::OracleConfidenceTooWide { .. } => ErrorKind::OracleConfidenceTooWide,
            Self::OracleAdapterUnavailable { .. } => ErrorKind::OracleAdapterUnavailable,
            Self::InvalidSlippage { .. } => ErrorKind::InvalidSlippage,
            Self::InvalidShareConversion { .. } => ErrorKind::InvalidShareConversion,
            Self::VaultCapacityExceeded { .. } => ErrorKind::VaultCapacityExceeded,
            Self::VaultInsolvent { .. } => ErrorKind::VaultInsolvent,
            Self::UnauthorizedAuthority { .. } => ErrorKind::UnauthorizedAuthority,
            Self::ProgramNotConfigured { .. } => ErrorKind::ProgramNotConfigured,
            Self::AccountParseError { .. } => ErrorKind::AccountParseError,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::TransactionBuildError { .. } => ErrorKind::TransactionBuildError,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn confidence(reason: impl Into<String>) -> Self {
        Self::OracleConfidenceTooWide {
            reason: reason.into(),
        }
    }

    pub(crate) fn account_parse(reason: impl Into<String>) -> Self {
        Self::AccountParseError {
            reason: reason.into(),
        }
    }

    pub(crate) fn unauthorized(reason: impl Into<String>) -> Self {
        Self::UnauthorizedAuthority {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_configured(reason: impl Into<String>) -> Self {
        Self::ProgramNotConfigured {
            reason: reason.into(),
            cause: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
