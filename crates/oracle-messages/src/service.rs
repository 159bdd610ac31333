//! # Oracle Message Service
//!
//! Application service implementing [`OracleMessageApi`]. Validation and
//! encoding are delegated to the domain layer; the service adds batch
//! parallelism, logging and the hand-off to the event sink.

use crate::adapters::emitter;
use crate::config::ServiceConfig;
use crate::domain::{decode_msg, Msg, ValidatedMsg, ValidationError, WireError};
use crate::ports::inbound::{AcceptError, BatchError, OracleMessageApi};
use crate::ports::outbound::{EvMap, EventSink};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Oracle message service over an event sink.
pub struct OracleMessageService<S: EventSink> {
    sink: S,
    config: ServiceConfig,
}

impl<S: EventSink> OracleMessageService<S> {
    /// Create a service with the default configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, ServiceConfig::default())
    }

    pub fn with_config(sink: S, config: ServiceConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn check(msg: Msg) -> Result<ValidatedMsg, ValidationError> {
        let msg_type = msg.msg_type();
        match msg.into_validated() {
            Ok(validated) => {
                debug!(
                    msg_type,
                    digest = %hex::encode(validated.sign_bytes_digest()),
                    "Message accepted"
                );
                Ok(validated)
            }
            Err(e) => {
                warn!(msg_type, kind = e.kind().as_str(), error = %e, "Message rejected");
                Err(e)
            }
        }
    }
}

impl<S: EventSink> OracleMessageApi for OracleMessageService<S> {
    fn decode(&self, bytes: &[u8]) -> Result<Msg, WireError> {
        decode_msg(bytes)
    }

    fn validate(&self, msg: Msg) -> Result<ValidatedMsg, ValidationError> {
        Self::check(msg)
    }

    fn sign_bytes(&self, msg: &Msg) -> Result<Vec<u8>, ValidationError> {
        Ok(Self::check(msg.clone())?.sign_bytes())
    }

    fn validate_batch(
        &self,
        msgs: Vec<Msg>,
    ) -> Result<Vec<Result<ValidatedMsg, ValidationError>>, BatchError> {
        if msgs.len() > self.config.max_batch_size {
            return Err(BatchError::TooLarge {
                max: self.config.max_batch_size,
                actual: msgs.len(),
            });
        }

        let total = msgs.len();
        let results: Vec<_> = if total >= self.config.parallel_threshold {
            msgs.into_par_iter().map(Self::check).collect()
        } else {
            msgs.into_iter().map(Self::check).collect()
        };

        let valid = results.iter().filter(|r| r.is_ok()).count();
        info!(total, valid, rejected = total - valid, "Batch validated");
        Ok(results)
    }

    fn accept(&self, validated: &ValidatedMsg, events: &EvMap) -> Result<usize, AcceptError> {
        if !self.config.emit_events {
            return Ok(0);
        }
        let records = emitter::project(validated, events)?;
        let published = self.sink.publish_all(records)?;
        debug!(msg_type = validated.msg().msg_type(), published, "Records published");
        Ok(published)
    }
}
