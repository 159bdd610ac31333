//! # Outbound Ports (Driven Ports / SPI)
//!
//! The external event sink. After the ledger applies an accepted message, its
//! effects are projected into key/value records and handed to an
//! [`EventSink`], which republishes them for external indexers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Ledger events of one applied message: `"<event>.<attribute>"` to values.
pub type EvMap = BTreeMap<String, Vec<String>>;

/// JSON dictionary carried by an emitted record.
pub type JsDict = serde_json::Map<String, serde_json::Value>;

/// One record published to the sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterMessage {
    pub key: String,
    pub value: JsDict,
}

impl EmitterMessage {
    pub fn new(key: impl Into<String>, value: JsDict) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Error from sink operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The consumer side is gone.
    #[error("event sink closed")]
    Closed,

    #[error("record rejected by sink: {reason}")]
    Rejected { reason: String },
}

/// Error projecting an accepted message into records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// The ledger did not report an attribute the projection needs
    /// (e.g. the id it assigned to a new data source).
    #[error("missing ledger event attribute {0}")]
    MissingAttribute(String),

    #[error("ledger event attribute {key} is not an integer: {value:?}")]
    InvalidInteger { key: String, value: String },
}

/// Destination for projected records.
///
/// Implementations must be thread-safe; the core never calls a sink itself,
/// the ledger does after applying a message.
pub trait EventSink: Send + Sync {
    fn publish(&self, message: EmitterMessage) -> Result<(), SinkError>;

    /// Publish records in order, stopping at the first failure.
    fn publish_all(&self, messages: Vec<EmitterMessage>) -> Result<usize, SinkError> {
        let count = messages.len();
        for message in messages {
            self.publish(message)?;
        }
        Ok(count)
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn publish(&self, message: EmitterMessage) -> Result<(), SinkError> {
        (**self).publish(message)
    }
}
