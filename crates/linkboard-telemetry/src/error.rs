//! Error types for telemetry operations.

use thiserror::Error;

/// Convenience alias for telemetry results.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Primary error type for telemetry operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A Prometheus collector could not be created or registered.
    #[error("failed to register metrics collector")]
    Registry {
        /// Underlying Prometheus error.
        #[source]
        source: prometheus::Error,
    },
    /// The metrics registry could not be rendered as text.
    #[error("failed to encode metrics")]
    Encode {
        /// Underlying Prometheus error.
        #[source]
        source: prometheus::Error,
    },
    /// The encoded metrics buffer was not valid UTF-8.
    #[error("metrics output was not valid UTF-8")]
    EncodingUtf8,
    /// The global tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber")]
    Subscriber {
        /// Detail from the subscriber library.
        message: String,
    },
}

impl From<prometheus::Error> for TelemetryError {
    fn from(source: prometheus::Error) -> Self {
        Self::Registry { source }
    }
}
