//! # CollectingSink: in-memory failure log
//!
//! Keeps every report it receives. Clones share the same storage, so one
//! clone can be installed while another is inspected.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::sinks::{Failure, FailureSink};

/// One stored report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    /// Channel name, if the report was structured.
    pub channel: Option<String>,
    /// Subscriber label, if the report was structured.
    pub subscriber: Option<String>,
    /// Error label (`subscriber_panicked`, `subscriber_failed`), if structured.
    pub kind: Option<&'static str>,
    /// Formatted message.
    pub message: String,
}

/// Failure sink that records reports in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    records: Arc<Mutex<Vec<FailureRecord>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records, oldest first.
    pub fn records(&self) -> Vec<FailureRecord> {
        self.records.lock().clone()
    }

    /// Returns the channel name of every structured record, oldest first.
    pub fn channels(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| r.channel.clone())
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drops all stored records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl FailureSink for CollectingSink {
    fn error(&self, message: &str) {
        self.records.lock().push(FailureRecord {
            channel: None,
            subscriber: None,
            kind: None,
            message: message.to_string(),
        });
    }

    fn report(&self, failure: &Failure<'_>) {
        self.records.lock().push(FailureRecord {
            channel: Some(failure.channel.to_string()),
            subscriber: Some(failure.subscriber.to_string()),
            kind: Some(failure.error.as_label()),
            message: failure.to_string(),
        });
    }

    fn name(&self) -> &'static str {
        "CollectingSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;

    #[test]
    fn test_clones_share_records() {
        let sink = CollectingSink::new();
        let other = sink.clone();

        sink.error("plain");
        let error = DispatchError::Panicked { info: "x".into() };
        other.report(&Failure {
            channel: "ch",
            subscriber: "sub",
            error: &error,
        });

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel, None);
        assert_eq!(records[0].message, "plain");
        assert_eq!(records[1].subscriber.as_deref(), Some("sub"));
        assert_eq!(records[1].kind, Some("subscriber_panicked"));
        assert_eq!(sink.channels(), vec!["ch"]);

        other.clear();
        assert!(sink.is_empty());
    }
}
