//! The store client and its per-primitive retry policy.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use linkboard_core::{
    CreatedIssue, IssueStore, IssueUpdate, LabelSet, Page, RawIssue, SubmissionError,
    SubmissionResult,
};
use linkboard_telemetry::Metrics;

use crate::convert::{created_issue_from_dto, raw_issue_from_dto};
use crate::error::{read_is_retryable, status_error, transport_error, write_transport_error};
use crate::types::{CreateRequest, CreatedDto, IssueDto, StoreOptions, UpdateRequest};

/// Read primitives attempt up to this many times on transient failure.
const READ_ATTEMPTS: u32 = 3;
/// Connect-stage failures during creation retry up to this many times.
const CREATE_ATTEMPTS: u32 = 3;
/// Base delay doubled per retry attempt.
const BACKOFF_BASE: Duration = Duration::from_millis(200);
/// Page size ceiling imposed by the service.
const MAX_PER_PAGE: u32 = 100;

/// Issue store adapter backed by a GitHub-style issues REST API.
#[derive(Clone)]
pub struct GithubIssueStore {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    metrics: Metrics,
}

impl GithubIssueStore {
    /// Construct a client for one repository.
    ///
    /// Every request carries the bearer token and is bounded by the
    /// configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(options: StoreOptions, metrics: Metrics) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", options.token))
            .context("store token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .context("user agent is not a valid header value")?,
        );

        let client = Client::builder()
            .timeout(options.request_timeout)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: options.api_base.trim_end_matches('/').to_string(),
            owner: options.owner,
            repo: options.repo,
            metrics,
        })
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_base, self.owner, self.repo
        )
    }

    fn issue_url(&self, number: u64) -> String {
        format!("{}/{number}", self.issues_url())
    }

    async fn read_issue_response(
        &self,
        operation: &'static str,
        response: Response,
        number: Option<u64>,
    ) -> SubmissionResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(operation, status.as_u16(), body, number))
    }
}

#[async_trait]
impl IssueStore for GithubIssueStore {
    async fn create(
        &self,
        title: &str,
        body: &str,
        labels: &LabelSet,
    ) -> SubmissionResult<CreatedIssue> {
        const OPERATION: &str = "issues.create";
        let request = CreateRequest {
            title,
            body,
            labels: labels.iter().collect(),
        };
        let url = self.issues_url();

        let mut attempt = 0;
        let response = loop {
            match self.client.post(&url).json(&request).send().await {
                Ok(response) => break response,
                // A connect failure means the request never reached the
                // server, so one more try cannot create a duplicate.
                Err(err) if err.is_connect() && attempt + 1 < CREATE_ATTEMPTS => {
                    attempt += 1;
                    self.metrics.inc_store_retry(OPERATION);
                    warn!(attempt, error = %err, "store connect failed; retrying create");
                    tokio::time::sleep(BACKOFF_BASE * 2u32.pow(attempt)).await;
                }
                Err(err) => return Err(write_transport_error(OPERATION, err)),
            }
        };

        let response = self.read_issue_response(OPERATION, response, None).await?;
        let dto: CreatedDto = response
            .json()
            .await
            .map_err(|err| transport_error(OPERATION, err))?;
        debug!(number = dto.number, "submission record created");
        Ok(created_issue_from_dto(dto))
    }

    async fn list_by_label(&self, label: &str, page: Page) -> SubmissionResult<Vec<RawIssue>> {
        const OPERATION: &str = "issues.list";
        let url = self.issues_url();
        let labels = format!("submission,{label}");
        let per_page = page.per_page.clamp(1, MAX_PER_PAGE).to_string();
        let page_number = page.number.max(1).to_string();

        let mut attempt = 0;
        loop {
            let outcome = match self
                .client
                .get(&url)
                .query(&[
                    ("labels", labels.as_str()),
                    ("state", "all"),
                    ("per_page", per_page.as_str()),
                    ("page", page_number.as_str()),
                ])
                .send()
                .await
            {
                Ok(response) => match self.read_issue_response(OPERATION, response, None).await {
                    Ok(response) => response
                        .json::<Vec<IssueDto>>()
                        .await
                        .map_err(|err| transport_error(OPERATION, err)),
                    Err(err) => Err(err),
                },
                Err(err) => Err(transport_error(OPERATION, err)),
            };

            match outcome {
                Ok(dtos) => {
                    return Ok(dtos
                        .into_iter()
                        .filter(|dto| dto.pull_request.is_none())
                        .map(raw_issue_from_dto)
                        .collect());
                }
                Err(err) if read_is_retryable(&err) && attempt + 1 < READ_ATTEMPTS => {
                    attempt += 1;
                    self.metrics.inc_store_retry(OPERATION);
                    warn!(attempt, error = %err, "store list failed; retrying");
                    tokio::time::sleep(BACKOFF_BASE * 2u32.pow(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get(&self, number: u64) -> SubmissionResult<RawIssue> {
        const OPERATION: &str = "issues.get";
        let url = self.issue_url(number);

        let mut attempt = 0;
        loop {
            let outcome = match self.client.get(&url).send().await {
                Ok(response) => {
                    match self
                        .read_issue_response(OPERATION, response, Some(number))
                        .await
                    {
                        Ok(response) => response
                            .json::<IssueDto>()
                            .await
                            .map_err(|err| transport_error(OPERATION, err)),
                        Err(err) => Err(err),
                    }
                }
                Err(err) => Err(transport_error(OPERATION, err)),
            };

            match outcome {
                Ok(dto) => return Ok(raw_issue_from_dto(dto)),
                Err(err) if read_is_retryable(&err) && attempt + 1 < READ_ATTEMPTS => {
                    attempt += 1;
                    self.metrics.inc_store_retry(OPERATION);
                    warn!(attempt, number, error = %err, "store fetch failed; retrying");
                    tokio::time::sleep(BACKOFF_BASE * 2u32.pow(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn update(&self, number: u64, update: IssueUpdate) -> SubmissionResult<()> {
        const OPERATION: &str = "issues.update";
        let request = UpdateRequest {
            labels: update
                .labels
                .map(|labels| labels.iter().map(str::to_string).collect()),
            body: update.body,
        };

        // Deliberately a single attempt: the caller re-reads state and
        // re-decides before any re-application (see the engine's policy).
        let response = self
            .client
            .patch(self.issue_url(number))
            .json(&request)
            .send()
            .await
            .map_err(|err| write_transport_error(OPERATION, err))?;

        let status = response.status();
        if status.is_success() {
            debug!(number, "submission record updated");
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(SubmissionError::NotFound { number });
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(OPERATION, status.as_u16(), body, Some(number)))
    }
}
