//! # Validation Errors
//!
//! Every way a message can fail `validate`. Validation stops at the first
//! failing check, so a rejected message carries exactly one of these.

use super::address::AddressError;
use thiserror::Error;

/// Reason a message was rejected by validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An identity field is empty, undecodable, or not 20 bytes wide.
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        source: AddressError,
    },

    #[error("{field} is too long: length {actual} exceeds maximum of {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} is too short: length {actual} is below minimum of {min}")]
    FieldTooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    /// The field holds the reserved do-not-modify marker.
    #[error("{field} must not be the reserved do-not-modify value")]
    ReservedValue { field: &'static str },

    /// `min_count` must satisfy `0 < min_count <= ask_count`.
    #[error("invalid counts: min_count {min_count}, ask_count {ask_count}")]
    InvalidCount { ask_count: u64, min_count: u64 },

    #[error("duplicate external id {external_id} in raw reports")]
    DuplicateExternalId { external_id: i64 },

    /// A validator tried to grant or revoke itself as reporter.
    #[error("validator cannot be its own reporter")]
    SelfReportDisallowed,
}

/// Fieldless view of [`ValidationError`] for callers that only branch on the
/// failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAddress,
    FieldTooLong,
    FieldTooShort,
    ReservedValue,
    InvalidCount,
    DuplicateExternalId,
    SelfReportDisallowed,
}

impl ErrorKind {
    /// Stable snake_case label, used as a structured log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "invalid_address",
            Self::FieldTooLong => "field_too_long",
            Self::FieldTooShort => "field_too_short",
            Self::ReservedValue => "reserved_value",
            Self::InvalidCount => "invalid_count",
            Self::DuplicateExternalId => "duplicate_external_id",
            Self::SelfReportDisallowed => "self_report_disallowed",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::FieldTooLong { .. } => ErrorKind::FieldTooLong,
            Self::FieldTooShort { .. } => ErrorKind::FieldTooShort,
            Self::ReservedValue { .. } => ErrorKind::ReservedValue,
            Self::InvalidCount { .. } => ErrorKind::InvalidCount,
            Self::DuplicateExternalId { .. } => ErrorKind::DuplicateExternalId,
            Self::SelfReportDisallowed => ErrorKind::SelfReportDisallowed,
        }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAddress { field, .. }
            | Self::FieldTooLong { field, .. }
            | Self::FieldTooShort { field, .. }
            | Self::ReservedValue { field } => Some(*field),
            Self::InvalidCount { .. } => Some("min_count"),
            Self::DuplicateExternalId { .. } => Some("raw_reports"),
            Self::SelfReportDisallowed => Some("reporter"),
        }
    }
}
