//! Core submission domain types shared across the workspace.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

pub use linkboard_events::{SubmissionPayload, SubmissionStatus};

use crate::codec::FENCE_MARKER;
use crate::error::{SubmissionError, SubmissionResult};

/// Constant marker label identifying records owned by this subsystem.
pub const LABEL_SUBMISSION: &str = "submission";
/// Status label for records awaiting review.
pub const LABEL_PENDING: &str = "pending";
/// Status label for accepted records.
pub const LABEL_APPROVED: &str = "approved";
/// Status label for declined records.
pub const LABEL_REJECTED: &str = "rejected";

/// Operator decision applied to a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// Accept the submission into the directory.
    Approve,
    /// Decline the submission.
    Reject,
}

impl ModerationAction {
    /// Status label the action transitions a record to.
    #[must_use]
    pub const fn target_label(self) -> &'static str {
        match self {
            Self::Approve => LABEL_APPROVED,
            Self::Reject => LABEL_REJECTED,
        }
    }
}

/// Ordered set of string labels attached to a stored record.
///
/// The external store owns the set; this type only computes intended values.
/// Ordering is stable so computed sets serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Label set applied to a freshly created submission.
    #[must_use]
    pub fn intake() -> Self {
        [LABEL_SUBMISSION, LABEL_PENDING].into_iter().collect()
    }

    /// Whether the set contains `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Insert a label, keeping set semantics.
    pub fn insert(&mut self, label: impl Into<String>) {
        self.0.insert(label.into());
    }

    /// Number of labels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the labels in stable order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Compute the label set a moderation decision transitions this set to.
    ///
    /// The intended set is recomputed from the freshly read current set, so
    /// re-applying the same decision is idempotent: `pending` is removed, the
    /// decision label and the `submission` marker are ensured present, and
    /// every unrelated label is preserved untouched.
    #[must_use]
    pub fn for_decision(&self, action: ModerationAction) -> Self {
        let mut next = self.0.clone();
        next.remove(LABEL_PENDING);
        next.insert(action.target_label().to_string());
        next.insert(LABEL_SUBMISSION.to_string());
        Self(next)
    }
}

impl FromIterator<String> for LabelSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for LabelSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// Raw record as returned by the external store, before decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    /// Store-internal identifier.
    pub id: u64,
    /// Store-assigned issue number; the record's public key.
    pub number: u64,
    /// Record title.
    pub title: String,
    /// Full text body as stored.
    pub body: String,
    /// Labels currently attached to the record.
    pub labels: LabelSet,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-assigned last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Browse URL for the record.
    pub url: String,
}

/// Identifiers assigned by the store when a record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Store-internal identifier.
    pub id: u64,
    /// Store-assigned issue number.
    pub number: u64,
    /// Browse URL for the record.
    pub url: String,
}

/// Partial update applied to a stored record in one external call.
///
/// `labels`, when present, replaces the full label set; `body`, when present,
/// replaces the full body text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueUpdate {
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelSet>,
    /// Replacement body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Page selector passed through to the store's native pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Records per page.
    pub per_page: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            per_page: 50,
        }
    }
}

/// One persisted submission plus its resolved moderation state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Store-assigned issue number.
    pub number: u64,
    /// Record title as stored.
    pub title: String,
    /// Moderation state resolved from the label set.
    pub status: SubmissionStatus,
    /// Decoded payload, absent when the stored body is malformed.
    pub payload: Option<SubmissionPayload>,
    /// Labels attached to the record at read time.
    pub labels: LabelSet,
    /// Full stored body, including any supplementary review notes.
    pub raw_body: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-assigned last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Browse URL for the record.
    pub url: String,
}

/// Validate a user-submitted payload against the field rules.
///
/// Runs entirely locally; a failure means no external call should be made.
///
/// # Errors
///
/// Returns [`SubmissionError::Validation`] naming the offending field.
pub fn validate_payload(payload: &SubmissionPayload) -> SubmissionResult<()> {
    require_text("title", &payload.title)?;
    require_text("description", &payload.description)?;
    require_identifier("category", &payload.category)?;
    if let Some(subcategory) = payload.subcategory.as_deref() {
        require_identifier("subcategory", subcategory)?;
    }
    if Url::parse(payload.url.trim()).is_err() {
        return Err(SubmissionError::Validation {
            field: "url",
            reason: "must be an absolute URL",
        });
    }
    require_fence_free("url", &payload.url)?;
    if let Some(note) = payload.submitter_note.as_deref() {
        require_fence_free("submitter_note", note)?;
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> SubmissionResult<()> {
    if value.trim().is_empty() {
        return Err(SubmissionError::Validation {
            field,
            reason: "must not be empty",
        });
    }
    require_fence_free(field, value)
}

fn require_identifier(field: &'static str, value: &str) -> SubmissionResult<()> {
    if value.is_empty() {
        return Err(SubmissionError::Validation {
            field,
            reason: "must not be empty",
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SubmissionError::Validation {
            field,
            reason: "must be an identifier (letters, digits, '-', '_')",
        });
    }
    Ok(())
}

fn require_fence_free(field: &'static str, value: &str) -> SubmissionResult<()> {
    if value.contains(FENCE_MARKER) {
        return Err(SubmissionError::Validation {
            field,
            reason: "must not contain the record delimiter sequence",
        });
    }
    Ok(())
}
