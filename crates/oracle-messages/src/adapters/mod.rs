//! Adapters layer: event projection and sink implementations.

pub mod emitter;
pub mod sinks;

pub use emitter::{atoi, project};
pub use sinks::{ChannelSink, NoOpSink, RecordingSink, TracingSink};

/// Record keys and ledger event names used by the projection.
pub mod topics {
    pub use super::emitter::event_types as ledger;
    pub use super::emitter::keys as records;
}
