//! The moderation state machine and listing service.
//!
//! Every public operation is one bounded sequence of sequential store calls.
//! No in-process lock serializes concurrent operations on the same record:
//! the store's last-write-wins label replacement is the only concurrency
//! control, and the read-resolve-write precondition check below narrows but
//! does not close the race window between two concurrent decisions.

use std::sync::Arc;

use tracing::{info, warn};

use linkboard_core::{
    IssueStore, IssueUpdate, LabelSet, ModerationAction, Page, RawIssue, SubmissionError,
    SubmissionPayload, SubmissionRecord, SubmissionResult, SubmissionStatus, codec,
    model::validate_payload, status,
};
use linkboard_events::{Event, EventBus};
use linkboard_telemetry::Metrics;

/// Identifiers returned to the submitter after intake.
#[derive(Debug, Clone)]
pub struct Submitted {
    /// Store-assigned issue number.
    pub number: u64,
    /// Browse URL of the created record.
    pub url: String,
}

/// Result of an accepted approval.
#[derive(Debug, Clone)]
pub struct ApproveOutcome {
    /// Issue number of the approved record.
    pub number: u64,
    /// Whether the publish notification was handed off.
    ///
    /// `false` means the record is approved in the store but the directory
    /// entry was not published; the condition is logged and counted, never
    /// retried automatically.
    pub published: bool,
}

/// Intake, moderation, and listing over an [`IssueStore`].
#[derive(Clone)]
pub struct ModerationService {
    store: Arc<dyn IssueStore>,
    events: EventBus,
    metrics: Metrics,
}

impl ModerationService {
    /// Wire the service to a store, the shared event bus, and metrics.
    #[must_use]
    pub fn new(store: Arc<dyn IssueStore>, events: EventBus, metrics: Metrics) -> Self {
        Self {
            store,
            events,
            metrics,
        }
    }

    /// Validate and record a new submission.
    ///
    /// Validation runs locally; on failure no external call is made. Store
    /// failures surface to the caller untouched — a blind end-to-end retry
    /// could create a duplicate record.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Validation`] for bad payloads, or the
    /// store's failure for the create call.
    pub async fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult<Submitted> {
        validate_payload(payload)?;
        let body = codec::encode_issue_body(payload);
        let created = self
            .store
            .create(&payload.title, &body, &LabelSet::intake())
            .await?;

        self.metrics.inc_submission_received();
        self.emit(Event::SubmissionReceived {
            number: created.number,
            title: payload.title.clone(),
        });
        info!(number = created.number, "submission recorded");

        Ok(Submitted {
            number: created.number,
            url: created.url,
        })
    }

    /// Approve a pending submission and hand the entry off for publication.
    ///
    /// Reads the current record, requires it to resolve to `Pending`, then
    /// replaces the label set in one store call. The publish notification is
    /// a second, non-atomic effect: when the stored payload cannot be
    /// decoded the record stays approved-but-unpublished and the outcome
    /// says so.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidTransition`] when the record is not
    /// pending, [`SubmissionError::NotFound`] when the number no longer
    /// resolves, or the store's failure for the update call.
    pub async fn approve(&self, number: u64) -> SubmissionResult<ApproveOutcome> {
        let record = self.store.get(number).await?;
        let current = status::resolve(&record.labels);
        if current != SubmissionStatus::Pending {
            return Err(SubmissionError::InvalidTransition {
                number,
                status: current,
            });
        }

        let target = record.labels.for_decision(ModerationAction::Approve);
        self.store
            .update(
                number,
                IssueUpdate {
                    labels: Some(target),
                    body: None,
                },
            )
            .await?;
        self.metrics.inc_submission_approved();
        self.emit(Event::SubmissionApproved { number });
        info!(number, "submission approved");

        let published = match codec::decode_issue_body(&record.body) {
            Some(entry) => {
                self.emit(Event::EntryPublished { number, entry });
                true
            }
            None => {
                warn!(number, "approved record has no decodable payload; publish skipped");
                self.metrics.inc_publish_failure();
                self.emit(Event::PublishFailed {
                    number,
                    message: "stored record has no decodable payload".to_string(),
                });
                false
            }
        };

        Ok(ApproveOutcome { number, published })
    }

    /// Reject a pending submission, optionally recording a reason.
    ///
    /// The reason is appended as supplementary body text in the same store
    /// call that swaps the labels, outside the structured payload block.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidTransition`] when the record is not
    /// pending, [`SubmissionError::NotFound`] when the number no longer
    /// resolves, or the store's failure for the update call.
    pub async fn reject(&self, number: u64, reason: Option<&str>) -> SubmissionResult<()> {
        let record = self.store.get(number).await?;
        let current = status::resolve(&record.labels);
        if current != SubmissionStatus::Pending {
            return Err(SubmissionError::InvalidTransition {
                number,
                status: current,
            });
        }

        let target = record.labels.for_decision(ModerationAction::Reject);
        let body = reason.map(|reason| codec::append_review_note(&record.body, reason));
        self.store
            .update(
                number,
                IssueUpdate {
                    labels: Some(target),
                    body,
                },
            )
            .await?;
        self.metrics.inc_submission_rejected();
        self.emit(Event::SubmissionRejected {
            number,
            reason: reason.map(str::to_string),
        });
        info!(number, "submission rejected");
        Ok(())
    }

    /// List records in one moderation state, in the store's native ordering.
    ///
    /// Records whose stored body fails to decode are still returned, with
    /// `payload` absent and the status derived purely from the label set.
    ///
    /// # Errors
    ///
    /// Returns the store's failure for the list call.
    pub async fn list(
        &self,
        state: SubmissionStatus,
        page: Page,
    ) -> SubmissionResult<Vec<SubmissionRecord>> {
        let raw = self
            .store
            .list_by_label(status::status_label(state), page)
            .await?;
        Ok(raw.into_iter().map(record_from_raw).collect())
    }

    fn emit(&self, event: Event) {
        self.metrics.inc_event(event.kind());
        let _ = self.events.publish(event);
    }
}

fn record_from_raw(raw: RawIssue) -> SubmissionRecord {
    let state = status::resolve(&raw.labels);
    let payload = codec::decode_issue_body(&raw.body);
    SubmissionRecord {
        number: raw.number,
        title: raw.title,
        status: state,
        payload,
        labels: raw.labels,
        raw_body: raw.body,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        url: raw.url,
    }
}
