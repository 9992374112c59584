use parking_lot::Mutex;

use crate::engine::events::{EventSink, SplitEvent};

/// Keeps every emitted event so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SplitEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SplitEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&SplitEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SplitEvent) {
        self.events.lock().push(event);
    }
}
