//! Issue-body encoding and decoding for submission payloads.
//!
//! A stored record is a human-readable restatement of the submitted fields
//! followed by one fenced JSON block holding the canonical payload. The
//! restatement exists for operators browsing the store directly; only the
//! fenced block takes part in decoding.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::SubmissionPayload;

/// Delimiter sequence no payload field may contain.
pub const FENCE_MARKER: &str = "```";

static PAYLOAD_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("payload block pattern is valid")
});

/// Render the stored body for a submission payload.
///
/// Deterministic for a given payload: the JSON block serializes fields in
/// declaration order and omits absent optional fields.
#[must_use]
pub fn encode_issue_body(payload: &SubmissionPayload) -> String {
    let mut category = payload.category.clone();
    if let Some(subcategory) = payload.subcategory.as_deref() {
        category.push_str(" > ");
        category.push_str(subcategory);
    }
    let note = payload
        .submitter_note
        .as_deref()
        .map(|note| format!("\n**Submitter note**: {note}\n"))
        .unwrap_or_default();
    let json = serde_json::to_string_pretty(payload)
        .expect("submission payload serializes to JSON");

    format!(
        "## Directory submission\n\n\
         **Title**: {title}\n\
         **URL**: {url}\n\
         **Description**: {description}\n\
         **Category**: {category}\n\
         {note}\n\
         ---\n\n\
         ### Submission data\n\n\
         ```json\n{json}\n```\n",
        title = payload.title,
        url = payload.url,
        description = payload.description,
    )
}

/// Recover the payload from a stored body.
///
/// Locates the first fenced JSON block and attempts a structured parse.
/// Returns `None` on any failure: missing block, malformed JSON, or a
/// missing required field. Optional fields absent from the block decode to
/// `None`, which is distinct from the payload itself being absent.
#[must_use]
pub fn decode_issue_body(body: &str) -> Option<SubmissionPayload> {
    let captures = PAYLOAD_BLOCK.captures(body)?;
    serde_json::from_str(captures.get(1)?.as_str()).ok()
}

/// Append supplementary reviewer text to a stored body.
///
/// The note lands after the payload block, so round-trip decoding of the
/// payload is unaffected.
#[must_use]
pub fn append_review_note(body: &str, note: &str) -> String {
    format!("{}\n\n---\n**Review note**: {note}\n", body.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            title: "Example".into(),
            url: "https://example.com".into(),
            description: "a site".into(),
            category: "dev".into(),
            subcategory: Some("tools".into()),
            submitter_note: Some("found it useful".into()),
        }
    }

    #[test]
    fn round_trips_full_payload() {
        let original = payload();
        let decoded = decode_issue_body(&encode_issue_body(&original));
        assert_eq!(decoded, Some(original));
    }

    #[test]
    fn round_trips_payload_without_optional_fields() {
        let original = SubmissionPayload {
            subcategory: None,
            submitter_note: None,
            ..payload()
        };
        let decoded = decode_issue_body(&encode_issue_body(&original))
            .expect("payload decodes");
        assert_eq!(decoded.subcategory, None);
        assert_eq!(decoded.submitter_note, None);
        assert_eq!(decoded, original);
    }

    #[test]
    fn encoding_is_deterministic() {
        let p = payload();
        assert_eq!(encode_issue_body(&p), encode_issue_body(&p));
    }

    #[test]
    fn body_without_block_decodes_to_none() {
        assert_eq!(decode_issue_body("free-form operator prose"), None);
    }

    #[test]
    fn malformed_block_decodes_to_none() {
        let body = "intro\n```json\n{\"title\": \"broken\"\n```\n";
        assert_eq!(decode_issue_body(body), None);
    }

    #[test]
    fn block_missing_required_field_decodes_to_none() {
        let body = "```json\n{\"title\": \"Example\", \"url\": \"https://example.com\"}\n```";
        assert_eq!(decode_issue_body(body), None);
    }

    #[test]
    fn first_block_wins_when_body_holds_several() {
        let first = payload();
        let mut second = payload();
        second.title = "Impostor".into();
        let body = format!(
            "{}\n{}",
            encode_issue_body(&first),
            encode_issue_body(&second)
        );
        let decoded = decode_issue_body(&body).expect("payload decodes");
        assert_eq!(decoded.title, "Example");
    }

    #[test]
    fn review_note_does_not_disturb_decoding() {
        let original = payload();
        let body = append_review_note(&encode_issue_body(&original), "duplicate of #12");
        assert!(body.contains("**Review note**: duplicate of #12"));
        assert_eq!(decode_issue_body(&body), Some(original));
    }
}
