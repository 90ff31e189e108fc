//! Issue store trait implemented by adapters.

use async_trait::async_trait;

use crate::error::SubmissionResult;
use crate::model::{CreatedIssue, IssueUpdate, LabelSet, Page, RawIssue};

/// Abstract contract over the external issue-tracking service.
///
/// Each primitive is independently fallible and owns its own transient-retry
/// policy. The store offers no transactions and no locking: `update` replaces
/// the full label set (and optionally the body) in one external call, and
/// last-write-wins is the only concurrency control available.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Create a new labeled record, returning the store-assigned identifiers.
    async fn create(
        &self,
        title: &str,
        body: &str,
        labels: &LabelSet,
    ) -> SubmissionResult<CreatedIssue>;

    /// List records carrying `label`, in the store's native ordering.
    async fn list_by_label(&self, label: &str, page: Page) -> SubmissionResult<Vec<RawIssue>>;

    /// Fetch one record by its store-assigned number.
    async fn get(&self, number: u64) -> SubmissionResult<RawIssue>;

    /// Apply a partial update to one record in a single external call.
    async fn update(&self, number: u64, update: IssueUpdate) -> SubmissionResult<()>;
}
