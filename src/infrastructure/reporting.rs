use crate::domain::event::FailureEvent;
use crate::domain::ports::EventReporter;
use std::sync::{Arc, Mutex};

/// Forwards failure events to `tracing` as structured `warn` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl EventReporter for TracingReporter {
    fn report(&self, event: &FailureEvent) {
        tracing::warn!(
            region = %event.region,
            currency = %event.currency,
            kind = %event.kind,
            stage = ?event.stage,
            reference = %event.reference,
            "payment failed"
        );
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl EventReporter for NoopReporter {
    fn report(&self, _event: &FailureEvent) {}
}

/// Keeps reported events in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// dispatcher and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<FailureEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events reported so far.
    pub fn events(&self) -> Vec<FailureEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventReporter for RecordingReporter {
    fn report(&self, event: &FailureEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
