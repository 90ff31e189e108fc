//! Submission route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
};
use tracing::info;

use linkboard_core::{ModerationAction, SubmissionPayload};

use crate::app::state::ApiState;
use crate::http::errors::{ApiError, map_submission_error};
use crate::http::submissions::{ListQuery, page_from_query, parse_status_filter};
use crate::models::{ActionResponse, ListResponse, ModerateRequest, SubmitResponse};

/// `POST /submissions` — anonymous intake.
pub(crate) async fn submit_submission(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let submitted = state
        .moderation
        .submit(&payload)
        .await
        .map_err(|err| map_submission_error("submit", err))?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "submission received and awaiting review".to_string(),
            issue_number: Some(submitted.number),
            issue_url: Some(submitted.url),
        }),
    ))
}

/// `GET /submissions?status=…` — status-filtered admin listing.
pub(crate) async fn list_submissions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let page = page_from_query(&query);

    let submissions = state
        .moderation
        .list(status, page)
        .await
        .map_err(|err| map_submission_error("list", err))?;

    Ok(Json(ListResponse {
        success: true,
        submissions,
    }))
}

/// `PATCH /submissions/{number}` — apply a moderation decision.
pub(crate) async fn moderate_submission(
    State(state): State<Arc<ApiState>>,
    AxumPath(number): AxumPath<u64>,
    Json(request): Json<ModerateRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let message = match request.action {
        ModerationAction::Approve => {
            let outcome = state
                .moderation
                .approve(number)
                .await
                .map_err(|err| map_submission_error("approve", err))?;
            info!(number, published = outcome.published, "approval applied");
            if outcome.published {
                "submission approved and handed off for publication".to_string()
            } else {
                "submission approved; the entry could not be published and needs attention"
                    .to_string()
            }
        }
        ModerationAction::Reject => {
            state
                .moderation
                .reject(number, request.reason.as_deref())
                .await
                .map_err(|err| map_submission_error("reject", err))?;
            info!(number, "rejection applied");
            "submission rejected".to_string()
        }
    };

    Ok(Json(ActionResponse {
        success: true,
        message,
    }))
}
