//! Request state, health tracking, and helpers.

use std::sync::Mutex;

use linkboard_core::{Page, SubmissionStatus};
use linkboard_events::{Event, EventBus};
use linkboard_moderation::ModerationService;
use linkboard_telemetry::Metrics;

/// Component name reported when the store probe fails.
pub(crate) const COMPONENT_ISSUE_STORE: &str = "issue_store";

/// State shared by every request handler.
pub struct ApiState {
    pub(crate) moderation: ModerationService,
    pub(crate) events: EventBus,
    pub(crate) telemetry: Metrics,
    health_status: Mutex<Vec<String>>,
}

impl ApiState {
    pub(crate) fn new(moderation: ModerationService, events: EventBus, telemetry: Metrics) -> Self {
        Self {
            moderation,
            events,
            telemetry,
            health_status: Mutex::new(Vec::new()),
        }
    }

    /// Mark a component as degraded, publishing a health event on change.
    pub(crate) fn add_degraded_component(&self, component: &str) -> bool {
        let mut guard = self
            .health_status
            .lock()
            .expect("health status mutex poisoned");
        if guard.iter().any(|entry| entry == component) {
            return false;
        }
        guard.push(component.to_string());
        guard.sort();
        let snapshot = guard.clone();
        drop(guard);
        let _ = self.events.publish(Event::HealthChanged { degraded: snapshot });
        true
    }

    /// Clear a degraded component, publishing a health event on change.
    pub(crate) fn remove_degraded_component(&self, component: &str) -> bool {
        let mut guard = self
            .health_status
            .lock()
            .expect("health status mutex poisoned");
        let previous = guard.len();
        guard.retain(|entry| entry != component);
        if guard.len() == previous {
            return false;
        }
        let snapshot = guard.clone();
        drop(guard);
        let _ = self.events.publish(Event::HealthChanged { degraded: snapshot });
        true
    }

    pub(crate) fn current_health_degraded(&self) -> Vec<String> {
        self.health_status
            .lock()
            .expect("health status mutex poisoned")
            .clone()
    }

    /// Probe store reachability with the cheapest available read.
    pub(crate) async fn probe_store(&self) -> bool {
        let probe = Page {
            number: 1,
            per_page: 1,
        };
        match self.moderation.list(SubmissionStatus::Pending, probe).await {
            Ok(_) => {
                self.remove_degraded_component(COMPONENT_ISSUE_STORE);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "issue store probe failed");
                self.add_degraded_component(COMPONENT_ISSUE_STORE);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use linkboard_test_support::{InMemoryIssueStore, InjectedFailure};

    fn state_with(store: &InMemoryIssueStore) -> ApiState {
        let events = EventBus::with_capacity(16);
        let metrics = Metrics::new().expect("metrics");
        let moderation =
            ModerationService::new(Arc::new(store.clone()), events.clone(), metrics.clone());
        ApiState::new(moderation, events, metrics)
    }

    #[test]
    fn degraded_components_are_tracked_once() {
        let store = InMemoryIssueStore::new();
        let state = state_with(&store);

        assert!(state.add_degraded_component(COMPONENT_ISSUE_STORE));
        assert!(!state.add_degraded_component(COMPONENT_ISSUE_STORE));
        assert_eq!(state.current_health_degraded().len(), 1);

        assert!(state.remove_degraded_component(COMPONENT_ISSUE_STORE));
        assert!(!state.remove_degraded_component(COMPONENT_ISSUE_STORE));
        assert!(state.current_health_degraded().is_empty());
    }

    #[tokio::test]
    async fn probe_reflects_store_availability() {
        let store = InMemoryIssueStore::new();
        let state = state_with(&store);

        assert!(state.probe_store().await);
        assert!(state.current_health_degraded().is_empty());

        store.fail_next("issues.list", InjectedFailure::Unavailable);
        assert!(!state.probe_store().await);
        assert_eq!(
            state.current_health_degraded(),
            vec![COMPONENT_ISSUE_STORE.to_string()]
        );

        assert!(state.probe_store().await);
        assert!(state.current_health_degraded().is_empty());
    }
}
