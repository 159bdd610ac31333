//! Event sink adapters.
//!
//! - `NoOpSink`: drops records (projection disabled or tests)
//! - `RecordingSink`: keeps records in memory
//! - `TracingSink`: logs each record
//! - `ChannelSink`: forwards records to an async consumer over a tokio channel

use crate::ports::outbound::{EmitterMessage, EventSink, SinkError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::info;

/// No-op sink.
#[derive(Debug, Clone, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn publish(&self, _message: EmitterMessage) -> Result<(), SinkError> {
        Ok(())
    }
}

/// In-memory sink that records every published message.
///
/// A push either completes or never happens, so a lock poisoned by a
/// panicking holder still guards a consistent list and is recovered.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<EmitterMessage>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<EmitterMessage>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of everything published so far.
    pub fn records(&self) -> Vec<EmitterMessage> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, message: EmitterMessage) -> Result<(), SinkError> {
        self.guard().push(message);
        Ok(())
    }
}

/// Sink that writes each record to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, message: EmitterMessage) -> Result<(), SinkError> {
        let value = serde_json::Value::Object(message.value);
        info!(target: "oracle::emitter", key = %message.key, value = %value, "Emitted record");
        Ok(())
    }
}

/// Sink backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<EmitterMessage>,
}

impl ChannelSink {
    /// Create the sink and the receiving half for the consumer task.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EmitterMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, message: EmitterMessage) -> Result<(), SinkError> {
        self.tx.send(message).map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::JsDict;
    use std::sync::Arc;

    fn record(key: &str) -> EmitterMessage {
        let mut value = JsDict::new();
        value.insert("id".to_string(), 1.into());
        EmitterMessage::new(key, value)
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        let published = sink
            .publish_all(vec![record("A"), record("B"), record("C")])
            .unwrap();

        assert_eq!(published, 3);
        let keys: Vec<_> = sink.records().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, ["A", "B", "C"]);
    }

    #[test]
    fn test_recording_sink_recovers_poisoned_lock() {
        let sink = Arc::new(RecordingSink::new());
        sink.publish(record("A")).unwrap();

        let holder = Arc::clone(&sink);
        let joined = std::thread::spawn(move || {
            let _guard = holder.records.lock().unwrap();
            panic!("panic while holding the record lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(sink.records.is_poisoned());

        assert_eq!(sink.len(), 1);
        sink.publish(record("B")).unwrap();
        let keys: Vec<_> = sink.records().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, ["A", "B"]);
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_arc_sink_delegates() {
        let sink = Arc::new(RecordingSink::new());
        let shared = Arc::clone(&sink);
        shared.publish(record("A")).unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_noop_and_tracing_sinks_accept() {
        assert!(NoOpSink.publish(record("A")).is_ok());
        assert!(TracingSink.publish(record("A")).is_ok());
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (sink, mut rx) = ChannelSink::new();
        sink.publish(record("A")).unwrap();
        sink.publish(record("B")).unwrap();

        assert_eq!(rx.recv().await.unwrap().key, "A");
        assert_eq!(rx.recv().await.unwrap().key, "B");
    }

    #[tokio::test]
    async fn test_channel_sink_closed() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        assert_eq!(sink.publish(record("A")), Err(SinkError::Closed));
    }
}
