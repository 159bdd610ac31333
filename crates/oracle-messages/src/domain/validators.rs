//! # Field Validators
//!
//! Reusable checks composed by each message's `validate`. Every check is a
//! pure function returning the error for its own field, so a message pipeline
//! is just a sequence of `?`-chained calls in the contractual order.

use super::address::{AccAddress, Identity, IdentityKind, ValAddress};
use super::constants::DO_NOT_MODIFY_BYTES;
use super::errors::ValidationError;
use std::collections::HashSet;

/// Fails with `FieldTooLong` when `s` is longer than `max` bytes.
pub fn bounded_string(field: &'static str, s: &str, max: usize) -> Result<(), ValidationError> {
    if s.len() > max {
        return Err(ValidationError::FieldTooLong {
            field,
            max,
            actual: s.len(),
        });
    }
    Ok(())
}

/// Fails with `FieldTooShort` below `min` bytes and `FieldTooLong` above `max`.
pub fn bounded_bytes(
    field: &'static str,
    bytes: &[u8],
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if bytes.len() < min {
        return Err(ValidationError::FieldTooShort {
            field,
            min,
            actual: bytes.len(),
        });
    }
    if bytes.len() > max {
        return Err(ValidationError::FieldTooLong {
            field,
            max,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Fails with `ReservedValue` when `bytes` is the do-not-modify marker.
pub fn not_sentinel(field: &'static str, bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes == DO_NOT_MODIFY_BYTES {
        return Err(ValidationError::ReservedValue { field });
    }
    Ok(())
}

/// Fails with `InvalidAddress` when the identity is empty or has the wrong width.
pub fn valid_identity<K: IdentityKind>(
    field: &'static str,
    identity: &Identity<K>,
) -> Result<(), ValidationError> {
    identity
        .verify_format()
        .map_err(|source| ValidationError::InvalidAddress { field, source })
}

/// Fails with `InvalidCount` unless `0 < min_count <= ask_count`.
pub fn count_ordering(ask_count: u64, min_count: u64) -> Result<(), ValidationError> {
    if min_count == 0 || min_count > ask_count {
        return Err(ValidationError::InvalidCount {
            ask_count,
            min_count,
        });
    }
    Ok(())
}

/// Fails with `FieldTooShort` when a required sequence has no elements.
pub fn non_empty(field: &'static str, len: usize) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::FieldTooShort {
            field,
            min: 1,
            actual: 0,
        });
    }
    Ok(())
}

/// Fails with `DuplicateExternalId` on the first external id seen twice.
pub fn distinct_external_ids<I>(ids: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = i64>,
{
    let mut seen = HashSet::new();
    for external_id in ids {
        if !seen.insert(external_id) {
            return Err(ValidationError::DuplicateExternalId { external_id });
        }
    }
    Ok(())
}

/// Fails with `SelfReportDisallowed` when the reporter is the validator's own
/// account.
pub fn no_self_report(
    validator: &ValAddress,
    reporter: &AccAddress,
) -> Result<(), ValidationError> {
    if validator.to_account() == *reporter {
        return Err(ValidationError::SelfReportDisallowed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;

    #[test]
    fn test_bounded_string_boundary() {
        assert!(bounded_string("name", &"x".repeat(128), 128).is_ok());
        let err = bounded_string("name", &"x".repeat(129), 128).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FieldTooLong {
                field: "name",
                max: 128,
                actual: 129
            }
        );
    }

    #[test]
    fn test_bounded_string_counts_bytes() {
        // "é" is two bytes in UTF-8
        assert!(bounded_string("name", &"é".repeat(64), 128).is_ok());
        assert!(bounded_string("name", &"é".repeat(65), 128).is_err());
    }

    #[test]
    fn test_bounded_bytes() {
        assert_eq!(
            bounded_bytes("executable", &[], 1, 8).unwrap_err().kind(),
            ErrorKind::FieldTooShort
        );
        assert!(bounded_bytes("executable", &[0; 8], 1, 8).is_ok());
        assert_eq!(
            bounded_bytes("executable", &[0; 9], 1, 8).unwrap_err().kind(),
            ErrorKind::FieldTooLong
        );
        assert!(bounded_bytes("calldata", &[], 0, 8).is_ok());
    }

    #[test]
    fn test_not_sentinel() {
        assert_eq!(
            not_sentinel("code", b"[do-not-modify]").unwrap_err(),
            ValidationError::ReservedValue { field: "code" }
        );
        assert!(not_sentinel("code", b"[do-not-modify] ").is_ok());
    }

    #[test]
    fn test_valid_identity() {
        assert!(valid_identity("owner", &AccAddress::from([1u8; 20])).is_ok());
        let bad = AccAddress::from_bytes(b"BAD_ADDR".to_vec());
        let err = valid_identity("owner", &bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        assert_eq!(err.field(), Some("owner"));
    }

    #[test]
    fn test_count_ordering() {
        assert!(count_ordering(10, 5).is_ok());
        assert!(count_ordering(5, 5).is_ok());
        assert!(count_ordering(2, 5).is_err());
        assert!(count_ordering(0, 0).is_err());
        assert!(count_ordering(10, 0).is_err());
    }

    #[test]
    fn test_distinct_external_ids_reports_first_repeat() {
        assert!(distinct_external_ids([1, 2, 3]).is_ok());
        assert!(distinct_external_ids(std::iter::empty()).is_ok());
        assert_eq!(
            distinct_external_ids([3, 1, 2, 1, 3]).unwrap_err(),
            ValidationError::DuplicateExternalId { external_id: 1 }
        );
    }

    #[test]
    fn test_no_self_report() {
        let validator = ValAddress::from([4u8; 20]);
        assert_eq!(
            no_self_report(&validator, &validator.to_account()),
            Err(ValidationError::SelfReportDisallowed)
        );
        assert!(no_self_report(&validator, &AccAddress::from([5u8; 20])).is_ok());
    }
}
