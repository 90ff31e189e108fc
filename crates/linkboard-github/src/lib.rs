//! GitHub-backed implementation of the issue store contract.
//!
//! Layout: `store.rs` (client and per-primitive retry policy), `types.rs`
//! (connection options and wire DTOs), `convert.rs` (wire-to-domain
//! mapping), `error.rs` (transport and status mapping into the shared
//! error taxonomy).

/// Wire-to-domain conversions.
pub mod convert;
/// Transport and status error mapping.
pub mod error;
/// The store client and its retry policy.
pub mod store;
/// Connection options and wire DTOs.
pub mod types;

pub use store::GithubIssueStore;
pub use types::StoreOptions;
