#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Environment-derived application configuration.
//!
//! Layout: `model.rs` (typed config models), `loader.rs` (environment
//! loading), `validate.rs` (validation helpers), `defaults.rs` (fallback
//! values).

/// Fallback values applied when optional variables are unset.
pub mod defaults;
/// Error types for configuration loading and validation.
pub mod error;
/// Environment loading for the application configuration.
pub mod loader;
/// Typed configuration models.
pub mod model;
/// Validation applied after loading.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppConfig, StoreConfig};
pub use validate::validate;
