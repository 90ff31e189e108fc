//! # Design
//!
//! - Provide one error taxonomy shared by the store adapter, the moderation
//!   engine, and the HTTP surface.
//! - Keep error messages constant; capture operational context in structured
//!   fields.
//! - Preserve sources for diagnostics without double-logging.

use std::error::Error;

use thiserror::Error;

use crate::model::SubmissionStatus;

/// Convenience alias for submission operation results.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Primary error type for submission operations.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Submitted payload failed a local field check; no external call was made.
    #[error("submission failed validation")]
    Validation {
        /// Payload field that failed the check.
        field: &'static str,
        /// Static reason describing the failure.
        reason: &'static str,
    },
    /// Transient store failure; nothing is known to have happened.
    #[error("issue store unavailable")]
    ServiceUnavailable {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A write was dispatched but its result was never observed.
    ///
    /// Distinct from [`SubmissionError::ServiceUnavailable`]: the store may
    /// have applied the write, so blind retries risk duplicates.
    #[error("issue store write outcome unknown")]
    UnknownOutcome {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The store understood the request and refused it; not retryable.
    #[error("issue store rejected the request")]
    RejectedByStore {
        /// Operation identifier.
        operation: &'static str,
        /// HTTP status returned by the store.
        status: u16,
        /// Response detail returned by the store, when available.
        message: String,
    },
    /// The issue number no longer resolves in the store.
    #[error("submission not found")]
    NotFound {
        /// Issue number that failed to resolve.
        number: u64,
    },
    /// A moderation action was attempted on a record outside the pending state.
    #[error("moderation action not applicable")]
    InvalidTransition {
        /// Issue number the action targeted.
        number: u64,
        /// Status the record was found in.
        status: SubmissionStatus,
    },
}

impl SubmissionError {
    /// Whether the failure left the store in a known-unchanged state.
    #[must_use]
    pub const fn nothing_happened(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::ServiceUnavailable { .. }
            | Self::RejectedByStore { .. }
            | Self::NotFound { .. }
            | Self::InvalidTransition { .. } => true,
            Self::UnknownOutcome { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_outcome_is_not_safe_to_retry() {
        let err = SubmissionError::UnknownOutcome {
            operation: "issues.create",
            source: "timed out".into(),
        };
        assert!(!err.nothing_happened());
        assert_eq!(err.to_string(), "issue store write outcome unknown");
    }

    #[test]
    fn transient_failures_are_safe_to_retry() {
        let err = SubmissionError::ServiceUnavailable {
            operation: "issues.list",
            source: "connection refused".into(),
        };
        assert!(err.nothing_happened());
    }

    #[test]
    fn invalid_transition_carries_observed_status() {
        let err = SubmissionError::InvalidTransition {
            number: 12,
            status: SubmissionStatus::Approved,
        };
        assert!(matches!(
            err,
            SubmissionError::InvalidTransition {
                number: 12,
                status: SubmissionStatus::Approved,
            }
        ));
    }
}
