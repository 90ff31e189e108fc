//! Error envelope and mapping from domain failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use linkboard_core::{SubmissionError, status::status_label};

use crate::models::ErrorBody;

/// Structured API error rendered as the `{success, message}` envelope the
/// submission form and admin view consume.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub(crate) fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub(crate) fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[cfg(test)]
    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Map a domain failure onto the wire envelope, logging store-side failures.
pub(crate) fn map_submission_error(context: &'static str, err: SubmissionError) -> ApiError {
    match &err {
        SubmissionError::Validation { field, reason } => {
            ApiError::bad_request(format!("{field} {reason}"))
        }
        SubmissionError::NotFound { number } => {
            ApiError::not_found(format!("submission #{number} not found"))
        }
        SubmissionError::InvalidTransition { number, status } => ApiError::conflict(format!(
            "submission #{number} is already {}",
            status_label(*status)
        )),
        SubmissionError::RejectedByStore { .. } => {
            error!(context, error = %err, "store rejected the request");
            ApiError::bad_gateway("the submission store rejected the request")
        }
        SubmissionError::ServiceUnavailable { .. } => {
            error!(context, error = %err, "store unavailable");
            ApiError::service_unavailable("the submission store is currently unavailable")
        }
        SubmissionError::UnknownOutcome { .. } => {
            error!(context, error = %err, "store write outcome unknown");
            ApiError::service_unavailable(
                "the submission store did not confirm the write; it may or may not have been applied",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkboard_core::SubmissionStatus;

    #[test]
    fn validation_errors_surface_the_field_verbatim() {
        let err = map_submission_error(
            "submit",
            SubmissionError::Validation {
                field: "title",
                reason: "must not be empty",
            },
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "title must not be empty");
    }

    #[test]
    fn invalid_transition_maps_to_conflict() {
        let err = map_submission_error(
            "moderate",
            SubmissionError::InvalidTransition {
                number: 41,
                status: SubmissionStatus::Rejected,
            },
        );
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message(), "submission #41 is already rejected");
    }

    #[test]
    fn store_failures_map_to_gateway_statuses() {
        let rejected = map_submission_error(
            "submit",
            SubmissionError::RejectedByStore {
                operation: "issues.create",
                status: 422,
                message: "validation failed".into(),
            },
        );
        assert_eq!(rejected.status, StatusCode::BAD_GATEWAY);

        let unavailable = map_submission_error(
            "list",
            SubmissionError::ServiceUnavailable {
                operation: "issues.list",
                source: "connection refused".into(),
            },
        );
        assert_eq!(unavailable.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn unknown_outcome_message_flags_the_ambiguity() {
        let err = map_submission_error(
            "submit",
            SubmissionError::UnknownOutcome {
                operation: "issues.create",
                source: "timed out".into(),
            },
        );
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.message().contains("may or may not"));
    }
}
