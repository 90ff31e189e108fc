//! Event bus and subscription plumbing.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::Sender;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use crate::payloads::{DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId};

/// Stream of envelopes handed to subscribers.
///
/// Items are `Err` when the subscriber lagged behind the broadcast buffer.
pub type EventStream =
    Pin<Box<dyn Stream<Item = Result<EventEnvelope, BroadcastStreamRecvError>> + Send>>;

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    replay: Arc<Mutex<VecDeque<EventEnvelope>>>,
    replay_capacity: usize,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    /// Construct a bus with a custom replay capacity.
    ///
    /// # Panics
    ///
    /// Panics if `replay_capacity` is zero.
    #[must_use]
    pub fn with_capacity(replay_capacity: usize) -> Self {
        assert!(replay_capacity > 0, "event bus capacity must be positive");
        let (sender, _) = broadcast::channel(replay_capacity);
        Self {
            sender,
            replay: Arc::new(Mutex::new(VecDeque::with_capacity(replay_capacity))),
            replay_capacity,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Construct a bus with the default replay capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Subscribe to the bus, replaying buffered events newer than `last_event_id`.
    ///
    /// Replay is local to the returned stream; other subscribers never see a
    /// second delivery. Identifiers are monotonic, so the backlog snapshot
    /// and the live feed are stitched together without duplicates.
    #[must_use]
    pub fn subscribe(&self, last_event_id: Option<EventId>) -> EventStream {
        let live = BroadcastStream::new(self.sender.subscribe());
        let Some(last) = last_event_id else {
            return Box::pin(live);
        };

        let backlog = self.backlog_since(last);
        let threshold = backlog.last().map_or(last, |env| env.id);
        let live = live.filter(move |item| match item {
            Ok(env) => env.id > threshold,
            Err(_) => true,
        });
        Box::pin(tokio_stream::iter(backlog.into_iter().map(Ok)).chain(live))
    }

    /// Publish a new event, assigning it a sequential identifier.
    ///
    /// Delivery to subscribers is best-effort; the envelope is always
    /// recorded in the replay ring so late subscribers can catch up.
    pub fn publish(&self, event: Event) -> EventId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };
        {
            let mut replay = self.lock_replay();
            if replay.len() == self.replay_capacity {
                let _ = replay.pop_front();
            }
            replay.push_back(envelope.clone());
        }
        let _ = self.sender.send(envelope);
        id
    }

    /// Last event id observed in the replay buffer.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock_replay().back().map(|env| env.id)
    }

    /// Collect a backlog of events emitted after the specified id.
    #[must_use]
    pub fn backlog_since(&self, id: EventId) -> Vec<EventEnvelope> {
        self.lock_replay()
            .iter()
            .filter(|env| env.id > id)
            .cloned()
            .collect()
    }

    fn lock_replay(&self) -> MutexGuard<'_, VecDeque<EventEnvelope>> {
        self.replay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_assigns_sequential_ids_and_buffers_backlog() {
        let bus = EventBus::with_capacity(8);
        let first = bus.publish(Event::SubmissionReceived {
            number: 1,
            title: "Example".into(),
        });
        let second = bus.publish(Event::SubmissionApproved { number: 1 });

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(bus.last_event_id(), Some(second));

        let backlog = bus.backlog_since(first);
        assert_eq!(backlog.len(), 1);
        assert_eq!(backlog[0].id, second);
    }

    #[tokio::test]
    async fn subscribe_streams_live_events() {
        let bus = EventBus::new();
        let mut stream = bus.subscribe(None);
        let id = bus.publish(Event::SubmissionRejected {
            number: 7,
            reason: Some("duplicate".into()),
        });
        let envelope = stream
            .next()
            .await
            .expect("stream item")
            .expect("broadcast ok");
        assert_eq!(envelope.id, id);
        assert!(matches!(
            envelope.event,
            Event::SubmissionRejected { number: 7, .. }
        ));
    }

    #[tokio::test]
    async fn reconnect_replays_missed_events_without_duplicates() {
        let bus = EventBus::with_capacity(8);
        let seen_before_disconnect = bus.publish(Event::SubmissionReceived {
            number: 1,
            title: "Example".into(),
        });
        let missed = bus.publish(Event::SubmissionApproved { number: 1 });

        let mut stream = bus.subscribe(Some(seen_before_disconnect));
        let replayed = stream
            .next()
            .await
            .expect("stream item")
            .expect("broadcast ok");
        assert_eq!(replayed.id, missed);

        let live = bus.publish(Event::SubmissionRejected {
            number: 2,
            reason: None,
        });
        let envelope = stream
            .next()
            .await
            .expect("stream item")
            .expect("broadcast ok");
        assert_eq!(envelope.id, live);
    }

    #[tokio::test]
    async fn replay_ring_drops_oldest_when_full() {
        let bus = EventBus::with_capacity(2);
        for number in 1..=3 {
            let _ = bus.publish(Event::SubmissionApproved { number });
        }
        let backlog = bus.backlog_since(0);
        assert_eq!(backlog.len(), 2);
        assert_eq!(backlog[0].id, 2);
        assert_eq!(backlog[1].id, 3);
    }
}
