//! Server-sent events streaming.
//!
//! This is how the content-store collaborator and the admin view observe
//! moderation events, including the publish notifications emitted on
//! approval. Reconnecting clients supply `Last-Event-ID` to replay missed
//! events from the bus's ring buffer.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::sse::{self, Sse},
};
use futures_util::StreamExt;
use serde::Deserialize;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{error, warn};

use linkboard_events::{EventEnvelope, EventId};

use crate::app::state::ApiState;
use crate::http::constants::{EVENT_KIND_WHITELIST, HEADER_LAST_EVENT_ID, SSE_KEEP_ALIVE_SECS};
use crate::http::errors::ApiError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SseQuery {
    #[serde(default)]
    pub(crate) event: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SseFilter {
    event_kinds: HashSet<String>,
}

impl SseFilter {
    fn matches(&self, envelope: &EventEnvelope) -> bool {
        self.event_kinds.is_empty() || self.event_kinds.contains(envelope.event.kind())
    }
}

pub(crate) async fn stream_events(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<SseQuery>,
) -> Result<Sse<impl futures_core::Stream<Item = Result<sse::Event, Infallible>> + Send>, ApiError>
{
    let last_id = headers
        .get(HEADER_LAST_EVENT_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<EventId>().ok());

    let filter = build_sse_filter(&query)?;
    let stream = state
        .events
        .subscribe(last_id)
        .filter_map(move |result| {
            let filter = filter.clone();
            async move {
                match result {
                    Ok(envelope) if filter.matches(&envelope) => {
                        match serde_json::to_string(&envelope) {
                            Ok(payload) => Some(Ok(sse::Event::default()
                                .id(envelope.id.to_string())
                                .event(envelope.event.kind())
                                .data(payload))),
                            Err(err) => {
                                error!(error = %err, "failed to serialise SSE event payload");
                                None
                            }
                        }
                    }
                    Ok(_) => None,
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        warn!(skipped, "SSE subscriber lagged; events dropped");
                        None
                    }
                }
            }
        });

    Ok(Sse::new(stream).keep_alive(
        sse::KeepAlive::new()
            .interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS))
            .text("keep-alive"),
    ))
}

pub(crate) fn build_sse_filter(query: &SseQuery) -> Result<SseFilter, ApiError> {
    let mut filter = SseFilter::default();
    if let Some(events) = query.event.as_deref() {
        for value in events.split(',') {
            let value = value.trim().to_lowercase();
            if value.is_empty() {
                continue;
            }
            if !EVENT_KIND_WHITELIST.contains(&value.as_str()) {
                return Err(ApiError::bad_request(format!(
                    "event filter '{value}' is not recognised"
                )));
            }
            filter.event_kinds.insert(value);
        }
    }
    Ok(filter)
}
