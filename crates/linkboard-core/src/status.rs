//! Label-set to moderation-status resolution.

use crate::model::{LABEL_APPROVED, LABEL_PENDING, LABEL_REJECTED, LabelSet, SubmissionStatus};

/// Resolve a raw label set to exactly one moderation status.
///
/// Precedence is policy, not accident: `approved` wins over everything,
/// then `rejected`, then the default of `Pending`. The default also covers
/// label sets the store should never legitimately hold — no status label at
/// all, or several at once — so resolution is total and a malformed record
/// is treated as still awaiting review rather than surfaced as an error.
#[must_use]
pub fn resolve(labels: &LabelSet) -> SubmissionStatus {
    if labels.contains(LABEL_APPROVED) {
        SubmissionStatus::Approved
    } else if labels.contains(LABEL_REJECTED) {
        SubmissionStatus::Rejected
    } else {
        SubmissionStatus::Pending
    }
}

/// Status label corresponding to a moderation status.
#[must_use]
pub const fn status_label(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Pending => LABEL_PENDING,
        SubmissionStatus::Approved => LABEL_APPROVED,
        SubmissionStatus::Rejected => LABEL_REJECTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_sets_resolve_to_their_status() {
        let pending: LabelSet = ["submission", "pending"].into_iter().collect();
        let approved: LabelSet = ["submission", "approved"].into_iter().collect();
        let rejected: LabelSet = ["submission", "rejected"].into_iter().collect();
        assert_eq!(resolve(&pending), SubmissionStatus::Pending);
        assert_eq!(resolve(&approved), SubmissionStatus::Approved);
        assert_eq!(resolve(&rejected), SubmissionStatus::Rejected);
    }

    #[test]
    fn approved_takes_precedence_over_rejected() {
        let both: LabelSet = ["approved", "rejected"].into_iter().collect();
        assert_eq!(resolve(&both), SubmissionStatus::Approved);
    }

    #[test]
    fn missing_status_labels_default_to_pending() {
        assert_eq!(resolve(&LabelSet::new()), SubmissionStatus::Pending);
        let marker_only: LabelSet = ["submission"].into_iter().collect();
        assert_eq!(resolve(&marker_only), SubmissionStatus::Pending);
        let unrelated: LabelSet = ["bug", "wontfix"].into_iter().collect();
        assert_eq!(resolve(&unrelated), SubmissionStatus::Pending);
    }

    #[test]
    fn pending_label_alongside_terminal_label_loses() {
        let mixed: LabelSet = ["submission", "pending", "rejected"].into_iter().collect();
        assert_eq!(resolve(&mixed), SubmissionStatus::Rejected);
    }

    #[test]
    fn status_labels_round_trip_through_resolution() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            let labels: LabelSet = ["submission", status_label(status)].into_iter().collect();
            assert_eq!(resolve(&labels), status);
        }
    }
}
