//! Service configuration.
//!
//! Address prefixes and field limits are part of the signing contract and are
//! not configurable; only runtime behavior of the service lives here.
//!
//! # Example
//!
//! ```ignore
//! use oracle_messages::ServiceConfig;
//!
//! let config = ServiceConfig::default()
//!     .with_parallel_threshold(128)
//!     .with_emit_events(false);
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("parallel_threshold must be at least 1")]
    ZeroParallelThreshold,

    #[error("max_batch_size must be at least 1")]
    ZeroMaxBatchSize,
}

/// Runtime configuration of [`crate::OracleMessageService`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Batches at least this long are validated on the rayon pool.
    pub parallel_threshold: usize,
    /// Whether `accept` projects and publishes records.
    pub emit_events: bool,
    /// Largest batch `validate_batch` will take.
    pub max_batch_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            emit_events: true,
            max_batch_size: 10_000,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ORACLE_PARALLEL_THRESHOLD`: parallel batch threshold (default: 64)
    /// - `ORACLE_EMIT_EVENTS`: publish projected records (default: true)
    /// - `ORACLE_MAX_BATCH_SIZE`: batch size limit (default: 10000)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            parallel_threshold: lookup("ORACLE_PARALLEL_THRESHOLD")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.parallel_threshold),

            emit_events: lookup("ORACLE_EMIT_EVENTS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.emit_events),

            max_batch_size: lookup("ORACLE_MAX_BATCH_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_batch_size),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::ZeroParallelThreshold);
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::ZeroMaxBatchSize);
        }
        Ok(())
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_emit_events(mut self, emit: bool) -> Self {
        self.emit_events = emit;
        self
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max;
        self
    }
}
