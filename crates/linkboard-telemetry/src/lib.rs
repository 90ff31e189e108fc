//! Telemetry primitives shared across the Linkboard workspace.
//!
//! This crate centralises logging, metrics, and request-id helpers so the
//! service crates agree on observability wiring.

/// Error types for telemetry operations.
pub mod error;
/// Logging initialisation and configuration.
pub mod init;
/// Request ID middleware helpers.
pub mod layers;
/// Prometheus-backed metrics registry.
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
pub use metrics::{Metrics, MetricsSnapshot};
