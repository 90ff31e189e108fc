//! In-memory issue store with failure injection.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use linkboard_core::{
    CreatedIssue, IssueStore, IssueUpdate, LabelSet, Page, RawIssue, SubmissionError,
    SubmissionResult,
};

/// Failure to inject into the next matching store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// Simulate a transient transport failure.
    Unavailable,
    /// Simulate a write whose outcome was never observed.
    UnknownOutcome,
    /// Simulate a permanent store rejection.
    Rejected,
}

#[derive(Default)]
struct Inner {
    next_number: u64,
    issues: BTreeMap<u64, RawIssue>,
    failures: VecDeque<(&'static str, InjectedFailure)>,
}

/// Map-backed [`IssueStore`] issuing monotonically increasing numbers.
///
/// Listing returns records newest-first, matching the external service's
/// native ordering.
#[derive(Clone, Default)]
pub struct InMemoryIssueStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryIssueStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next call to `operation`.
    ///
    /// Operation names match the adapter's identifiers: `issues.create`,
    /// `issues.list`, `issues.get`, `issues.update`.
    pub fn fail_next(&self, operation: &'static str, failure: InjectedFailure) {
        self.lock().failures.push_back((operation, failure));
    }

    /// Read a stored record without going through the trait.
    #[must_use]
    pub fn raw(&self, number: u64) -> Option<RawIssue> {
        self.lock().issues.get(&number).cloned()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().issues.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().issues.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn take_failure(inner: &mut Inner, operation: &'static str) -> SubmissionResult<()> {
        let Some(position) = inner
            .failures
            .iter()
            .position(|(op, _)| *op == operation)
        else {
            return Ok(());
        };
        let (_, failure) = inner.failures.remove(position).expect("position is valid");
        Err(match failure {
            InjectedFailure::Unavailable => SubmissionError::ServiceUnavailable {
                operation,
                source: "injected transport failure".into(),
            },
            InjectedFailure::UnknownOutcome => SubmissionError::UnknownOutcome {
                operation,
                source: "injected lost response".into(),
            },
            InjectedFailure::Rejected => SubmissionError::RejectedByStore {
                operation,
                status: 422,
                message: "injected rejection".into(),
            },
        })
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn create(
        &self,
        title: &str,
        body: &str,
        labels: &LabelSet,
    ) -> SubmissionResult<CreatedIssue> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, "issues.create")?;

        inner.next_number += 1;
        let number = inner.next_number;
        let now = Utc::now();
        let issue = RawIssue {
            id: number + 1_000,
            number,
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.clone(),
            created_at: now,
            updated_at: now,
            url: format!("https://issues.example/acme/directory/{number}"),
        };
        let created = CreatedIssue {
            id: issue.id,
            number,
            url: issue.url.clone(),
        };
        inner.issues.insert(number, issue);
        Ok(created)
    }

    async fn list_by_label(&self, label: &str, page: Page) -> SubmissionResult<Vec<RawIssue>> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, "issues.list")?;

        let matching: Vec<RawIssue> = inner
            .issues
            .values()
            .rev()
            .filter(|issue| issue.labels.contains("submission") && issue.labels.contains(label))
            .cloned()
            .collect();

        let per_page = page.per_page.max(1) as usize;
        let start = (page.number.max(1) as usize - 1) * per_page;
        Ok(matching.into_iter().skip(start).take(per_page).collect())
    }

    async fn get(&self, number: u64) -> SubmissionResult<RawIssue> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, "issues.get")?;

        inner
            .issues
            .get(&number)
            .cloned()
            .ok_or(SubmissionError::NotFound { number })
    }

    async fn update(&self, number: u64, update: IssueUpdate) -> SubmissionResult<()> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, "issues.update")?;

        let issue = inner
            .issues
            .get_mut(&number)
            .ok_or(SubmissionError::NotFound { number })?;
        if let Some(labels) = update.labels {
            issue.labels = labels;
        }
        if let Some(body) = update.body {
            issue.body = body;
        }
        issue.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_issues_monotonic_numbers() {
        let store = InMemoryIssueStore::new();
        let first = store
            .create("a", "body", &LabelSet::intake())
            .await
            .expect("create");
        let second = store
            .create("b", "body", &LabelSet::intake())
            .await
            .expect("create");
        assert!(second.number > first.number);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_label_filtered() {
        let store = InMemoryIssueStore::new();
        let _ = store
            .create("a", "body", &LabelSet::intake())
            .await
            .expect("create");
        let second = store
            .create("b", "body", &LabelSet::intake())
            .await
            .expect("create");

        let approved: LabelSet = ["submission", "approved"].into_iter().collect();
        store
            .update(
                second.number,
                IssueUpdate {
                    labels: Some(approved),
                    body: None,
                },
            )
            .await
            .expect("update");

        let pending = store
            .list_by_label("pending", Page::default())
            .await
            .expect("list");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "a");

        let approved = store
            .list_by_label("approved", Page::default())
            .await
            .expect("list");
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].title, "b");
    }

    #[tokio::test]
    async fn injected_failures_fire_once() {
        let store = InMemoryIssueStore::new();
        store.fail_next("issues.create", InjectedFailure::Unavailable);

        let err = store
            .create("a", "body", &LabelSet::intake())
            .await
            .expect_err("injected failure");
        assert!(matches!(err, SubmissionError::ServiceUnavailable { .. }));
        assert!(store.is_empty());

        store
            .create("a", "body", &LabelSet::intake())
            .await
            .expect("second attempt succeeds");
        assert_eq!(store.len(), 1);
    }
}
