//! # Outbound Ports
//!
//! What the contract needs from its surroundings.

use crate::events::WaveHiveEvent;

/// Event sink - outbound port.
///
/// Receives one event per committed mutation, in commit order.
pub trait EventSink: Send + Sync {
    /// Publish a committed event.
    fn publish(&self, event: WaveHiveEvent);
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: WaveHiveEvent) {}
}
