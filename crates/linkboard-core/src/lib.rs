//! Store-agnostic submission domain types and interfaces.
//!
//! Layout: `model/` (payload validation, label sets, records), `codec.rs`
//! (issue-body encoding), `status.rs` (label-to-status resolution),
//! `service/` (the issue store trait), `error.rs` (shared error taxonomy).

/// Issue-body encoding and decoding for submission payloads.
pub mod codec;
/// Shared error taxonomy for submission operations.
pub mod error;
/// Domain model types and payload validation.
pub mod model;
/// Issue store trait implemented by adapters.
pub mod service;
/// Label-set to moderation-status resolution.
pub mod status;

pub use error::{SubmissionError, SubmissionResult};
pub use linkboard_events::{SubmissionPayload, SubmissionStatus};
pub use model::{
    CreatedIssue, IssueUpdate, LabelSet, ModerationAction, Page, RawIssue, SubmissionRecord,
};
pub use service::IssueStore;
