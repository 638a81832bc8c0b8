//! Miette-based error diagnostics for CLI error presentation.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, ErrorCategory};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(laserium::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic for `error` raised while loading `src`.
    #[must_use]
    pub fn new(error: &ConfigError, src: impl Into<String>) -> Self {
        let span = match error {
            ConfigError::Parse(e) => e.span().map(|range| SourceSpan::from(range.start..range.end)),
            _ => None,
        };
        let help = match error {
            ConfigError::InvalidValue { field, .. } | ConfigError::MissingField { field } => {
                Some(format!("check `{field}` in the configuration file"))
            }
            _ => None,
        };
        Self {
            message: error.to_string(),
            src: src.into(),
            span,
            help,
        }
    }
}

/// Engine failure reported by a command.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(laserium::engine))]
pub struct EngineDiagnostic {
    pub kind: &'static str,
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl From<Error> for EngineDiagnostic {
    fn from(error: Error) -> Self {
        let kind = error.kind();
        let help = match kind.category() {
            ErrorCategory::CallerInput => Some("check the command arguments".to_owned()),
            ErrorCategory::DataTrust => {
                Some("the snapshot data was rejected; capture a fresh snapshot".to_owned())
            }
            ErrorCategory::BusinessRule => None,
            ErrorCategory::Internal => Some("the snapshot violates a vault invariant".to_owned()),
            ErrorCategory::Integration => {
                Some("check the oracle feeds and yield sources in the configuration".to_owned())
            }
        };
        let message = match &error {
            Error::ProgramNotConfigured {
                reason,
                cause: Some(cause),
            } => format!("{reason}: {cause}"),
            _ => error.to_string(),
        };
        Self {
            kind: kind.as_str(),
            message,
            help,
        }
    }
}
