//! Connection options and wire DTOs for the GitHub-style issues API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection settings for one repository acting as the submission store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Bearer token sent with every request.
    pub token: String,
    /// Per-request timeout; a call failing to complete within it is
    /// surfaced instead of hanging.
    pub request_timeout: Duration,
    /// `User-Agent` header value, required by the service.
    pub user_agent: String,
}

/// Label object as returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct LabelDto {
    pub(crate) name: String,
}

/// Issue object as returned by list and fetch calls.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueDto {
    pub(crate) id: u64,
    pub(crate) number: u64,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) body: Option<String>,
    #[serde(default)]
    pub(crate) labels: Vec<LabelDto>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) html_url: String,
    /// Present when the record is a pull request; those are not submissions.
    #[serde(default)]
    pub(crate) pull_request: Option<serde_json::Value>,
}

/// Subset of the create response this system consumes.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedDto {
    pub(crate) id: u64,
    pub(crate) number: u64,
    pub(crate) html_url: String,
}

/// Request body for issue creation.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    pub(crate) title: &'a str,
    pub(crate) body: &'a str,
    pub(crate) labels: Vec<&'a str>,
}

/// Request body for a partial issue update.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<String>,
}
