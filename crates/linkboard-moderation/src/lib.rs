//! Moderation workflow over the external issue store.
#![forbid(unsafe_code)]

/// The moderation state machine and listing service.
pub mod service;

pub use service::{ApproveOutcome, ModerationService, Submitted};
