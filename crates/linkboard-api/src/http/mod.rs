//! HTTP surface modules (router, handlers, streaming).

/// Shared constants and header names for HTTP surfaces.
pub mod constants;
/// Error envelope and mapping from domain failures.
pub mod errors;
/// Health and diagnostics endpoints.
pub mod health;
/// Router construction and server host.
pub mod router;
/// Submission intake, listing, and moderation handlers.
pub mod submissions;
/// Server-sent events streaming.
pub mod sse;
/// Metrics middleware for HTTP requests.
pub mod telemetry;
