//! Wire DTOs consumed by the submission form and admin view.

use serde::{Deserialize, Serialize};

use linkboard_core::{ModerationAction, SubmissionRecord};
use linkboard_telemetry::MetricsSnapshot;

/// Response envelope for submission intake.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Whether the submission was recorded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Store-assigned issue number, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
    /// Browse URL of the created record, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
}

/// Response envelope for the status-filtered listing.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Whether the listing call succeeded.
    pub success: bool,
    /// Records in the requested state, in the store's native ordering.
    pub submissions: Vec<SubmissionRecord>,
}

/// Request body for a moderation decision.
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    /// The decision to apply.
    pub action: ModerationAction,
    /// Optional reviewer note recorded on rejection.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response envelope for a moderation decision.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Whether the decision was applied.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

/// Error envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable failure description.
    pub message: String,
}

/// Lightweight liveness probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the process is serving requests.
    pub status: &'static str,
}

/// Extended health response including a store reachability probe.
#[derive(Debug, Serialize)]
pub struct FullHealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    /// Build identifier recorded at startup.
    pub build: String,
    /// Components currently considered degraded.
    pub degraded: Vec<String>,
    /// Moderation counter snapshot.
    pub metrics: MetricsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submit_response_uses_camel_case_keys() {
        let response = SubmitResponse {
            success: true,
            message: "submission received".into(),
            issue_number: Some(41),
            issue_url: Some("https://issues.example/acme/directory/41".into()),
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["issueNumber"], json!(41));
        assert!(value.get("issue_number").is_none());
    }

    #[test]
    fn moderate_request_parses_actions() {
        let approve: ModerateRequest =
            serde_json::from_value(json!({"action": "approve"})).expect("parse");
        assert!(matches!(approve.action, ModerationAction::Approve));
        assert_eq!(approve.reason, None);

        let reject: ModerateRequest =
            serde_json::from_value(json!({"action": "reject", "reason": "duplicate"}))
                .expect("parse");
        assert!(matches!(reject.action, ModerationAction::Reject));
        assert_eq!(reject.reason.as_deref(), Some("duplicate"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<ModerateRequest, _> =
            serde_json::from_value(json!({"action": "escalate"}));
        assert!(result.is_err());
    }
}
