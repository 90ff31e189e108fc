//! HTTP surface for submission intake and moderation.
//!
//! Layout: `http/` (router, handlers, error mapping, SSE), `app/`
//! (shared request state), `models.rs` (wire DTOs).

/// Shared application state for request handlers.
pub mod app;
/// HTTP surface modules (router, handlers, streaming).
pub mod http;
/// Wire DTOs consumed by the submission form and admin view.
pub mod models;

pub use http::router::ApiServer;
