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

//! Shared test harness for the Linkboard workspace.
//!
//! Provides an in-memory [`linkboard_core::IssueStore`] with failure
//! injection, plus payload fixtures, so engine and API tests run without an
//! external service.

/// Payload fixtures shared across test suites.
pub mod fixtures;
/// In-memory issue store with failure injection.
pub mod store;

pub use fixtures::sample_payload;
pub use store::{InMemoryIssueStore, InjectedFailure};
