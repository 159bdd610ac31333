//! # Oracle Telemetry
//!
//! Structured logging for the oracle message crates and tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oracle_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::for_tool("oracle-cli"))?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `oracle` | Service name in logs |
//! | `ORACLE_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `ORACLE_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `ORACLE_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for a process. Call once, early in `main`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)
}
