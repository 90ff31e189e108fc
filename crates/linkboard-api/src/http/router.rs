//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderName, Method, Request, header::CONTENT_TYPE},
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

use linkboard_events::EventBus;
use linkboard_moderation::ModerationService;
use linkboard_telemetry::{Metrics, build_sha};

use crate::app::state::ApiState;
use crate::http::constants::{HEADER_LAST_EVENT_ID, HEADER_REQUEST_ID};
use crate::http::health::{health, health_full, metrics};
use crate::http::sse::stream_events;
use crate::http::submissions::handlers::{
    list_submissions, moderate_submission, submit_submission,
};
use crate::http::telemetry::HttpMetricsLayer;

/// Axum router wrapper that hosts the submission services.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct a new API server with shared dependencies wired through
    /// application state.
    #[must_use]
    pub fn new(moderation: ModerationService, events: EventBus, telemetry: Metrics) -> Self {
        let state = Arc::new(ApiState::new(moderation, events, telemetry.clone()));

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers([
                CONTENT_TYPE,
                HeaderName::from_static(HEADER_LAST_EVENT_ID),
            ]);

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let method = request.method().clone();
                let uri_path = request.uri().path();
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();

                tracing::info_span!(
                    "http.request",
                    method = %method,
                    route = %uri_path,
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    let status = response.status().as_u16();
                    span.record("status_code", status);
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );

        let layered = ServiceBuilder::new()
            .layer(linkboard_telemetry::propagate_request_id_layer())
            .layer(linkboard_telemetry::set_request_id_layer())
            .layer(trace_layer)
            .layer(HttpMetricsLayer::new(telemetry));

        let router = Self::build_router()
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/health", get(health))
            .route("/health/full", get(health_full))
            .route("/metrics", get(metrics))
            .route("/events", get(stream_events))
            .route(
                "/submissions",
                post(submit_submission).get(list_submissions),
            )
            .route("/submissions/{number}", patch(moderate_submission))
    }

    /// Serve the API using the configured router on the supplied address.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        tracing::info!("Starting API on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router.into_make_service()).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) const fn router(&self) -> &Router {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use linkboard_test_support::InMemoryIssueStore;

    #[tokio::test]
    async fn server_construction_wires_all_routes() {
        let store = InMemoryIssueStore::new();
        let events = EventBus::with_capacity(16);
        let telemetry = Metrics::new().expect("metrics");
        let moderation =
            ModerationService::new(Arc::new(store), events.clone(), telemetry.clone());
        let server = ApiServer::new(moderation, events, telemetry);
        let _router = server.router();
    }
}
