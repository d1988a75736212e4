//! Event Log Adapter
//!
//! Implements `EventSink` by buffering events in memory until drained.

use crate::events::WaveHiveEvent;
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use tracing::trace;

/// In-memory event buffer.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<WaveHiveEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&self) -> Vec<WaveHiveEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: WaveHiveEvent) {
        trace!(topic = event.topic(), "[wave-hive] Event buffered");
        self.events.lock().push(event);
    }
}
