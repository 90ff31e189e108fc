//! Payload fixtures shared across test suites.

use linkboard_core::SubmissionPayload;

/// A minimal valid submission payload.
#[must_use]
pub fn sample_payload() -> SubmissionPayload {
    SubmissionPayload {
        title: "Example".into(),
        url: "https://example.com".into(),
        description: "a site".into(),
        category: "dev".into(),
        subcategory: None,
        submitter_note: None,
    }
}
