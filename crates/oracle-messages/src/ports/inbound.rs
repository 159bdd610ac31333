//! # Inbound Port - OracleMessageApi
//!
//! Driving port used by the ledger's message router and by tooling.
//!
//! | Method | Caller |
//! |--------|--------|
//! | `decode` | transaction decoder, CLI |
//! | `validate` | ante handler (stateless check before execution) |
//! | `sign_bytes` | wallets, signature verification |
//! | `validate_batch` | block-level pre-checks |
//! | `accept` | ledger, after applying a message |

use crate::domain::{Msg, ValidatedMsg, ValidationError, WireError};
use crate::ports::outbound::{EvMap, ProjectionError, SinkError};
use thiserror::Error;

/// Error handing an applied message to the event sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AcceptError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Error rejecting a whole batch before any message is checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("batch of {actual} messages exceeds limit of {max}")]
    TooLarge { max: usize, actual: usize },
}

/// Primary API for the oracle message core.
///
/// # Example
///
/// ```rust,ignore
/// use oracle_messages::ports::OracleMessageApi;
///
/// fn sign(api: &impl OracleMessageApi, raw: &[u8]) -> anyhow::Result<Vec<u8>> {
///     let msg = api.decode(raw)?;
///     Ok(api.validate(msg)?.sign_bytes())
/// }
/// ```
pub trait OracleMessageApi: Send + Sync {
    /// Parse one amino-JSON envelope. Does not validate.
    fn decode(&self, bytes: &[u8]) -> Result<Msg, WireError>;

    /// Run the message's checks in order and seal it on success.
    ///
    /// # Errors
    /// The first failing check, see [`ValidationError`].
    fn validate(&self, msg: Msg) -> Result<ValidatedMsg, ValidationError>;

    /// Canonical sign bytes of `msg`, validating it first.
    fn sign_bytes(&self, msg: &Msg) -> Result<Vec<u8>, ValidationError>;

    /// Validate every message independently. Output order matches input order.
    ///
    /// # Errors
    /// `TooLarge` when the batch exceeds the configured maximum.
    fn validate_batch(
        &self,
        msgs: Vec<Msg>,
    ) -> Result<Vec<Result<ValidatedMsg, ValidationError>>, BatchError>;

    /// Project an applied message and its ledger events into records and
    /// publish them. Returns the number of records published (0 when
    /// emission is disabled).
    fn accept(&self, validated: &ValidatedMsg, events: &EvMap) -> Result<usize, AcceptError>;
}
