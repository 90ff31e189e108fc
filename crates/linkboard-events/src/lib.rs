//! Core event bus for the Linkboard platform.
//!
//! The bus provides a typed event enum, sequential identifiers, and support for
//! replaying recent events when subscribers reconnect (e.g. SSE clients that
//! supply `Last-Event-ID`). Internally it uses `tokio::broadcast` with a bounded
//! buffer; when the channel overflows, the oldest events are dropped.

/// Event payload types and shared submission types.
pub mod payloads;
/// Event bus and subscription plumbing.
pub mod routing;

pub use payloads::{
    DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId, SubmissionPayload, SubmissionStatus,
};
pub use routing::{EventBus, EventStream};
