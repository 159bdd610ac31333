//! Ports layer for the oracle message core.
//!
//! - Inbound (Driving) port: `OracleMessageApi`, used by the ledger and the CLI
//! - Outbound (Driven) port: `EventSink`, fed with projected records

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
