//! Domain event sink trait and implementations.

use log::debug;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

use super::DomainEvent;

/// Trait for receiving domain events.
///
/// `emit()` must be fast and non-blocking, and a failure to deliver must not
/// affect the mutation that produced the event.
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);

    /// Emit multiple domain events.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Publish/subscribe sink backed by a broadcast channel.
///
/// Every subscriber sees every event emitted after it subscribed. Slow
/// subscribers lose the oldest events once `capacity` is exceeded.
#[derive(Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl DomainEventSink for BroadcastEventSink {
    fn emit(&self, event: DomainEvent) {
        // An error only means nobody is listening right now.
        if self.tx.send(event).is_err() {
            debug!("Domain event dropped: no active subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpDomainEventSink;
        sink.emit(DomainEvent::entry_appended("a"));
        sink.emit_batch(vec![
            DomainEvent::entry_appended("b"),
            DomainEvent::entry_removed("a"),
        ]);
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::entry_appended("a"));
        sink.emit_batch(vec![
            DomainEvent::entry_appended("b"),
            DomainEvent::entry_removed("a"),
        ]);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.events()[2], DomainEvent::entry_removed("a"));
    }

    #[tokio::test]
    async fn test_broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastEventSink::new(8);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();

        sink.emit(DomainEvent::entry_appended("abc"));

        assert_eq!(first.recv().await.unwrap(), DomainEvent::entry_appended("abc"));
        assert_eq!(second.recv().await.unwrap(), DomainEvent::entry_appended("abc"));
    }

    #[test]
    fn test_broadcast_sink_without_subscribers_is_silent() {
        let sink = BroadcastEventSink::new(1);
        sink.emit(DomainEvent::entry_removed("gone"));
    }
}
