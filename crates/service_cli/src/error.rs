//! CLI error types.

use std::path::PathBuf;

use pricer_core::types::{ConfigurationError, DateError, DomainError, PricingError, SolverError};
use thiserror::Error;

/// Errors raised by the desk and the commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing library failure
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Malformed date in a trade file or argument
    #[error(transparent)]
    Date(#[from] DateError),

    /// File could not be read or written
    #[error("{}: {source}", path.display())]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Trade or configuration file does not match its schema
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON rendering failed
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("invalid {key}: {value}")]
    InvalidSetting {
        /// Setting name
        key: &'static str,
        /// Rejected value
        value: String,
    },
}

macro_rules! impl_from_pricing {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CliError {
                fn from(err: $ty) -> Self {
                    CliError::Pricing(err.into())
                }
            }
        )*
    };
}

impl_from_pricing!(ConfigurationError, DomainError, SolverError);

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
