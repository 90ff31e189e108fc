//! Health and diagnostics endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use axum::extract::State;
use tracing::error;

use linkboard_telemetry::build_sha;

use crate::app::state::ApiState;
use crate::http::errors::ApiError;
use crate::models::{FullHealthResponse, HealthResponse};

/// Liveness probe; answers without touching the external store.
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Extended probe including store reachability and counter snapshot.
pub(crate) async fn health_full(State(state): State<Arc<ApiState>>) -> Json<FullHealthResponse> {
    let _ = state.probe_store().await;
    let degraded = state.current_health_degraded();
    let status = if degraded.is_empty() { "ok" } else { "degraded" };
    Json(FullHealthResponse {
        status,
        build: build_sha().to_string(),
        degraded,
        metrics: state.telemetry.snapshot(),
    })
}

/// Prometheus text exposition endpoint.
pub(crate) async fn metrics(State(state): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    match state.telemetry.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .map_err(|err| {
                error!(error = %err, "failed to build metrics response");
                ApiError::internal("failed to build metrics response")
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            Err(ApiError::internal("failed to render metrics"))
        }
    }
}
