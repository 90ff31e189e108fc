//! Transport and status error mapping into the shared error taxonomy.

use linkboard_core::SubmissionError;

/// Classify a transport-level failure for an operation whose write, if any,
/// was not yet handed to the server.
pub(crate) fn transport_error(operation: &'static str, source: reqwest::Error) -> SubmissionError {
    SubmissionError::ServiceUnavailable {
        operation,
        source: Box::new(source),
    }
}

/// Classify a transport-level failure for a dispatched write.
///
/// A timeout here means the server may have applied the write before the
/// response was observed, so the outcome is unknown rather than failed.
pub(crate) fn write_transport_error(
    operation: &'static str,
    source: reqwest::Error,
) -> SubmissionError {
    if source.is_timeout() {
        SubmissionError::UnknownOutcome {
            operation,
            source: Box::new(source),
        }
    } else {
        SubmissionError::ServiceUnavailable {
            operation,
            source: Box::new(source),
        }
    }
}

/// Map a non-success response status onto the shared taxonomy.
pub(crate) fn status_error(
    operation: &'static str,
    status: u16,
    body: String,
    number: Option<u64>,
) -> SubmissionError {
    if status == 404
        && let Some(number) = number
    {
        return SubmissionError::NotFound { number };
    }
    if (400..500).contains(&status) {
        return SubmissionError::RejectedByStore {
            operation,
            status,
            message: truncate_detail(body),
        };
    }
    SubmissionError::ServiceUnavailable {
        operation,
        source: format!("store returned status {status}").into(),
    }
}

/// Whether a read primitive may be retried after this failure.
pub(crate) fn read_is_retryable(error: &SubmissionError) -> bool {
    matches!(error, SubmissionError::ServiceUnavailable { .. })
}

const MAX_DETAIL_LEN: usize = 512;

fn truncate_detail(body: String) -> String {
    if body.len() <= MAX_DETAIL_LEN {
        body
    } else {
        let mut end = MAX_DETAIL_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body[..end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_requires_a_number_context() {
        let err = status_error("issues.get", 404, String::new(), Some(9));
        assert!(matches!(err, SubmissionError::NotFound { number: 9 }));

        let err = status_error("issues.list", 404, String::new(), None);
        assert!(matches!(err, SubmissionError::RejectedByStore { .. }));
    }

    #[test]
    fn client_errors_are_permanent_rejections() {
        let err = status_error("issues.create", 422, "validation failed".into(), None);
        match err {
            SubmissionError::RejectedByStore {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "validation failed");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn server_errors_are_transient() {
        let err = status_error("issues.list", 502, String::new(), None);
        assert!(matches!(err, SubmissionError::ServiceUnavailable { .. }));
        assert!(read_is_retryable(&err));
    }

    #[test]
    fn oversized_detail_is_truncated() {
        let err = status_error("issues.create", 422, "x".repeat(2_000), None);
        match err {
            SubmissionError::RejectedByStore { message, .. } => {
                assert_eq!(message.len(), 512);
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
