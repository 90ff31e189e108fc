//! Error types for configuration loading and validation.

use thiserror::Error;

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing environment variable")]
    MissingVar {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// A variable was set but its value could not be parsed or failed validation.
    #[error("invalid configuration value")]
    InvalidValue {
        /// Variable or field that failed.
        name: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when it is safe to echo back.
        value: Option<String>,
    },
}
