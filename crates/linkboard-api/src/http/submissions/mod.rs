//! Submission intake, listing, and moderation handlers.

use serde::Deserialize;

use linkboard_core::{Page, SubmissionStatus};

use crate::http::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::http::errors::ApiError;

pub(crate) mod handlers;

/// Query string accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) page: Option<u32>,
    #[serde(default)]
    pub(crate) per_page: Option<u32>,
}

/// Parse the `status` filter; absent means pending, the review queue.
pub(crate) fn parse_status_filter(value: Option<&str>) -> Result<SubmissionStatus, ApiError> {
    match value {
        None | Some("pending") => Ok(SubmissionStatus::Pending),
        Some("approved") => Ok(SubmissionStatus::Approved),
        Some("rejected") => Ok(SubmissionStatus::Rejected),
        Some(other) => Err(ApiError::bad_request(format!(
            "status filter '{other}' is not recognised"
        ))),
    }
}

pub(crate) fn page_from_query(query: &ListQuery) -> Page {
    Page {
        number: query.page.unwrap_or(1).max(1),
        per_page: query
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn status_filter_defaults_to_pending() {
        assert_eq!(
            parse_status_filter(None).expect("default"),
            SubmissionStatus::Pending
        );
        assert_eq!(
            parse_status_filter(Some("approved")).expect("approved"),
            SubmissionStatus::Approved
        );
    }

    #[test]
    fn unknown_status_filter_is_a_bad_request() {
        let err = parse_status_filter(Some("archived")).expect_err("unknown filter");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn page_bounds_are_clamped() {
        let query = ListQuery {
            status: None,
            page: Some(0),
            per_page: Some(10_000),
        };
        let page = page_from_query(&query);
        assert_eq!(page.number, 1);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);
    }
}
