//! Event sink trait and the built-in sinks.

use crate::CaseEvent;
use std::sync::{Arc, Mutex};

/// The notification collaborator the engine publishes to.
///
/// Publishing is fire-and-forget from the engine's point of view: a sink
/// must not fail the business operation that produced the event, so
/// `publish` is infallible. Sinks that deliver over a network are expected
/// to queue internally and handle their own retries.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: CaseEvent);
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: CaseEvent) {}
}

/// Sink that records events in memory, for tests and local inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<CaseEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in publish order.
    pub fn events(&self) -> Vec<CaseEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: CaseEvent) {
        self.events.lock().unwrap().push(event);
    }
}
