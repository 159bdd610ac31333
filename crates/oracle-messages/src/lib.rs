//! # Oracle Messages
//!
//! Transaction messages of the data-oracle module: data source and oracle
//! script registration, data requests, validator reports and reporter
//! management. For every message this crate provides stateless validation
//! and the canonical sign bytes that signers sign.
//!
//! ## Messages
//!
//! | Type | Amino name | Signer |
//! |------|------------|--------|
//! | `create_data_source` | `oracle/CreateDataSource` | sender |
//! | `edit_data_source` | `oracle/EditDataSource` | sender |
//! | `create_oracle_script` | `oracle/CreateOracleScript` | sender |
//! | `edit_oracle_script` | `oracle/EditOracleScript` | sender |
//! | `request` | `oracle/Request` | sender |
//! | `report` | `oracle/Report` | reporter |
//! | `activate` | `oracle/Activate` | validator (account form) |
//! | `add_reporter` | `oracle/AddReporter` | validator (account form) |
//! | `remove_reporter` | `oracle/RemoveReporter` | validator (account form) |
//!
//! ## Sign Bytes
//!
//! ```text
//! {"type":"oracle/<Name>","value":{<fields, keys sorted, compact>}}
//! ```
//!
//! 64-bit ids and counts are quoted decimal strings, `exit_code` is a bare
//! number, byte blobs are standard base64, identities are bech32. Sign bytes
//! are only available on [`ValidatedMsg`], so an unvalidated message can
//! never be signed.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/emitter.rs - projection of applied messages           │
//! │  adapters/sinks.rs   - NoOp, Recording, Tracing, Channel sinks  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - OracleMessageApi trait                     │
//! │  ports/outbound.rs - EventSink trait                            │
//! │  service.rs        - OracleMessageService                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/messages.rs   - message structs and validate()          │
//! │  domain/validators.rs - field checks                            │
//! │  domain/canonical.rs  - canonical JSON encoder                  │
//! │  domain/address.rs    - bech32 identities                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oracle_messages::{decode_msg, OracleMessageApi, OracleMessageService, RecordingSink};
//!
//! let service = OracleMessageService::new(RecordingSink::new());
//! let msg = service.decode(raw_json)?;
//! let validated = service.validate(msg)?;
//! let to_sign = validated.sign_bytes();
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ChannelSink, NoOpSink, RecordingSink, TracingSink};
pub use config::{ConfigError, ServiceConfig};
pub use domain::*;
pub use ports::{
    AcceptError, BatchError, EmitterMessage, EvMap, EventSink, JsDict, OracleMessageApi,
    ProjectionError, SinkError,
};
pub use service::OracleMessageService;
