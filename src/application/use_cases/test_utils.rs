//! Shared fixtures for use-case tests

use std::sync::{Arc, Mutex};

use crate::application::ports::{Telemetry, TraceContext};

/// Telemetry sink that remembers every event name in order
#[derive(Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<String>>,
}

impl RecordingTelemetry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn names(&self) -> Vec<String> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    fn record(&self, entry: String) {
        if let Ok(mut records) = self.records.lock() {
            records.push(entry);
        }
    }
}

impl Telemetry for RecordingTelemetry {
    fn track_trace(&self, name: &str, _context: &TraceContext) {
        self.record(name.to_string());
    }

    fn track_event(&self, name: &str, _context: &TraceContext) {
        self.record(name.to_string());
    }

    fn track_exception(&self, _error: &str, _context: &TraceContext) {
        self.record("exception".to_string());
    }
}
