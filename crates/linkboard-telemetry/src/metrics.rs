//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters relevant to submission intake and moderation.

use std::sync::Arc;

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{TelemetryError, TelemetryResult};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    events_emitted_total: IntCounterVec,
    store_retries_total: IntCounterVec,
    submissions_received_total: IntCounter,
    submissions_approved_total: IntCounter,
    submissions_rejected_total: IntCounter,
    publish_failures_total: IntCounter,
}

/// Snapshot of selected counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Total submissions accepted by intake.
    pub submissions_received_total: u64,
    /// Total submissions approved by operators.
    pub submissions_approved_total: u64,
    /// Total submissions rejected by operators.
    pub submissions_rejected_total: u64,
    /// Approved submissions whose publish hand-off failed.
    pub publish_failures_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> TelemetryResult<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["route", "code"],
        )?;
        let events_emitted_total = IntCounterVec::new(
            Opts::new("events_emitted_total", "Domain events emitted by type"),
            &["type"],
        )?;
        let store_retries_total = IntCounterVec::new(
            Opts::new(
                "store_retries_total",
                "Transient issue store failures that were retried",
            ),
            &["operation"],
        )?;
        let submissions_received_total = IntCounter::with_opts(Opts::new(
            "submissions_received_total",
            "Submissions accepted by intake",
        ))?;
        let submissions_approved_total = IntCounter::with_opts(Opts::new(
            "submissions_approved_total",
            "Submissions approved by operators",
        ))?;
        let submissions_rejected_total = IntCounter::with_opts(Opts::new(
            "submissions_rejected_total",
            "Submissions rejected by operators",
        ))?;
        let publish_failures_total = IntCounter::with_opts(Opts::new(
            "publish_failures_total",
            "Approved submissions left unpublished",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(events_emitted_total.clone()))?;
        registry.register(Box::new(store_retries_total.clone()))?;
        registry.register(Box::new(submissions_received_total.clone()))?;
        registry.register(Box::new(submissions_approved_total.clone()))?;
        registry.register(Box::new(submissions_rejected_total.clone()))?;
        registry.register(Box::new(publish_failures_total.clone()))?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                events_emitted_total,
                store_retries_total,
                submissions_received_total,
                submissions_approved_total,
                submissions_rejected_total,
                publish_failures_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Increment the emitted event counter for the specific event type.
    pub fn inc_event(&self, event_type: &str) {
        self.inner
            .events_emitted_total
            .with_label_values(&[event_type])
            .inc();
    }

    /// Increment the retry counter for a store primitive.
    pub fn inc_store_retry(&self, operation: &str) {
        self.inner
            .store_retries_total
            .with_label_values(&[operation])
            .inc();
    }

    /// Increment the intake counter.
    pub fn inc_submission_received(&self) {
        self.inner.submissions_received_total.inc();
    }

    /// Increment the approval counter.
    pub fn inc_submission_approved(&self) {
        self.inner.submissions_approved_total.inc();
    }

    /// Increment the rejection counter.
    pub fn inc_submission_rejected(&self) {
        self.inner.submissions_rejected_total.inc();
    }

    /// Increment the counter of approved-but-unpublished submissions.
    pub fn inc_publish_failure(&self) {
        self.inner.publish_failures_total.inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Encode { source })?;
        String::from_utf8(buffer).map_err(|_| TelemetryError::EncodingUtf8)
    }

    /// Take a point-in-time snapshot of the moderation counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submissions_received_total: self.inner.submissions_received_total.get(),
            submissions_approved_total: self.inner.submissions_approved_total.get(),
            submissions_rejected_total: self.inner.submissions_rejected_total.get(),
            publish_failures_total: self.inner.publish_failures_total.get(),
        }
    }
}
