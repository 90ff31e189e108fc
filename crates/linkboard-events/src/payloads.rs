//! Event payload types carried across the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to each event emitted by the platform.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 1_024;

/// Typed domain events surfaced across the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A new submission was recorded in the external store.
    SubmissionReceived {
        /// Issue number assigned by the store.
        number: u64,
        /// Title of the proposed directory entry.
        title: String,
    },
    /// A pending submission was approved by an operator.
    SubmissionApproved {
        /// Issue number of the approved submission.
        number: u64,
    },
    /// A pending submission was rejected by an operator.
    SubmissionRejected {
        /// Issue number of the rejected submission.
        number: u64,
        /// Optional reviewer-supplied reason.
        reason: Option<String>,
    },
    /// An approved entry is ready for the directory content store.
    EntryPublished {
        /// Issue number the entry originated from.
        number: u64,
        /// The decoded directory entry to publish.
        entry: SubmissionPayload,
    },
    /// An approved submission could not be handed off for publication.
    PublishFailed {
        /// Issue number of the submission left unpublished.
        number: u64,
        /// Human-readable detail describing the failure.
        message: String,
    },
    /// System health status changed (degraded or restored components).
    HealthChanged {
        /// Components currently considered degraded.
        degraded: Vec<String>,
    },
}

impl Event {
    /// Machine-friendly discriminator for SSE consumers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SubmissionReceived { .. } => "submission_received",
            Self::SubmissionApproved { .. } => "submission_approved",
            Self::SubmissionRejected { .. } => "submission_rejected",
            Self::EntryPublished { .. } => "entry_published",
            Self::PublishFailed { .. } => "publish_failed",
            Self::HealthChanged { .. } => "health_changed",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and emission timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Monotonic identifier assigned to the wrapped event.
    pub id: EventId,
    /// Timestamp recording when the envelope was produced.
    pub timestamp: DateTime<Utc>,
    /// Wrapped event payload.
    pub event: Event,
}

/// User-authored fields describing a proposed directory entry.
///
/// Immutable once created; the wire casing matches the persisted record
/// format, so decoding older stored records keeps working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Display title of the proposed entry.
    pub title: String,
    /// Absolute URL the entry points at.
    pub url: String,
    /// Short description shown alongside the entry.
    pub description: String,
    /// Identifier of the directory category the entry belongs to.
    pub category: String,
    /// Optional identifier of a subcategory within `category`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Optional free-form note from the submitter to the reviewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_note: Option<String>,
}

/// Moderation lifecycle states that downstream consumers care about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting operator review.
    Pending,
    /// Accepted into the directory; terminal.
    Approved,
    /// Declined by an operator; terminal.
    Rejected,
}

impl SubmissionStatus {
    /// Whether the state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_maps_every_variant() {
        let entry = SubmissionPayload {
            title: "Example".into(),
            url: "https://example.com".into(),
            description: "a site".into(),
            category: "dev".into(),
            subcategory: None,
            submitter_note: None,
        };
        let cases = [
            (
                Event::SubmissionReceived {
                    number: 1,
                    title: "Example".into(),
                },
                "submission_received",
            ),
            (Event::SubmissionApproved { number: 1 }, "submission_approved"),
            (
                Event::SubmissionRejected {
                    number: 1,
                    reason: Some("duplicate".into()),
                },
                "submission_rejected",
            ),
            (
                Event::EntryPublished { number: 1, entry },
                "entry_published",
            ),
            (
                Event::PublishFailed {
                    number: 1,
                    message: "no payload".into(),
                },
                "publish_failed",
            ),
            (
                Event::HealthChanged {
                    degraded: vec!["issue_store".into()],
                },
                "health_changed",
            ),
        ];
        for (event, expected) in cases {
            assert_eq!(event.kind(), expected);
        }
    }

    #[test]
    fn payload_wire_casing_is_camel_case() {
        let payload = SubmissionPayload {
            title: "Example".into(),
            url: "https://example.com".into(),
            description: "a site".into(),
            category: "dev".into(),
            subcategory: Some("tools".into()),
            submitter_note: Some("please review".into()),
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json.get("submitterNote").is_some());
        assert!(json.get("submitter_note").is_none());
    }

    #[test]
    fn payload_optional_fields_are_omitted_when_absent() {
        let payload = SubmissionPayload {
            title: "Example".into(),
            url: "https://example.com".into(),
            description: "a site".into(),
            category: "dev".into(),
            subcategory: None,
            submitter_note: None,
        };
        let json = serde_json::to_string(&payload).expect("serialize");
        assert!(!json.contains("subcategory"));
        assert!(!json.contains("submitterNote"));
    }

    #[test]
    fn terminal_states() {
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(SubmissionStatus::Approved.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
    }
}
