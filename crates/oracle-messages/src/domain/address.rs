//! # Identity Codec
//!
//! Account and validator-operator identities. Both are 20-byte values with a
//! bech32 human-readable form; they differ only in prefix, but the type system
//! keeps them apart so a validator identity can never be passed where an
//! account is expected without an explicit [`ValAddress::to_account`].
//!
//! ```text
//! AccAddress  band1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq2vqal4
//! ValAddress  bandvaloper1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqx6y767
//! ```
//!
//! Decoded identities keep their raw bytes even when the width is wrong; the
//! width is enforced by [`Identity::verify_format`] during message validation.

use bech32::{FromBase32, ToBase32, Variant};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Width of every identity in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Bech32 prefix for account identities.
pub const ACCOUNT_HRP: &str = "band";

/// Bech32 prefix for validator-operator identities.
pub const VALIDATOR_HRP: &str = "bandvaloper";

/// Errors decoding or checking an identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address")]
    Empty,

    #[error("invalid bech32 string: {0}")]
    Bech32(#[from] bech32::Error),

    #[error("wrong address prefix: expected {expected}, got {actual}")]
    WrongPrefix {
        expected: &'static str,
        actual: String,
    },

    /// Address was encoded with the bech32m checksum.
    #[error("address uses bech32m checksum, expected bech32")]
    WrongVariant,

    #[error("incorrect address length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

// =============================================================================
// Identity kinds (zero-sized markers)
// =============================================================================

/// Marker trait naming the bech32 prefix of an identity class.
pub trait IdentityKind {
    const HRP: &'static str;
    const LABEL: &'static str;
}

/// Marker: account identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Account;

/// Marker: validator-operator identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Validator;

impl IdentityKind for Account {
    const HRP: &'static str = ACCOUNT_HRP;
    const LABEL: &'static str = "AccAddress";
}

impl IdentityKind for Validator {
    const HRP: &'static str = VALIDATOR_HRP;
    const LABEL: &'static str = "ValAddress";
}

/// A binary identity tagged with its class.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity<K> {
    bytes: Vec<u8>,
    _kind: PhantomData<K>,
}

/// Account identity.
pub type AccAddress = Identity<Account>;

/// Validator-operator identity.
pub type ValAddress = Identity<Validator>;

impl<K: IdentityKind> Identity<K> {
    /// Wrap raw bytes. The width is not checked here.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            _kind: PhantomData,
        }
    }

    /// The empty identity (renders as `""`).
    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Decode the bech32 form, requiring this kind's prefix and a 20-byte payload.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        if s.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data, variant) = bech32::decode(s)?;
        if hrp != K::HRP {
            return Err(AddressError::WrongPrefix {
                expected: K::HRP,
                actual: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::WrongVariant);
        }

        let identity = Self::from_bytes(Vec::<u8>::from_base32(&data)?);
        identity.verify_format()?;
        Ok(identity)
    }

    /// Render the bech32 form. The empty identity renders as `""`.
    pub fn to_bech32(&self) -> String {
        if self.bytes.is_empty() {
            return String::new();
        }
        bech32::encode(K::HRP, self.bytes.to_base32(), Variant::Bech32)
            .expect("bech32 encoding cannot fail with a constant lowercase prefix")
    }

    /// Check the identity is non-empty and exactly [`ADDRESS_LENGTH`] bytes.
    pub fn verify_format(&self) -> Result<(), AddressError> {
        if self.bytes.is_empty() {
            return Err(AddressError::Empty);
        }
        if self.bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::WrongLength {
                expected: ADDRESS_LENGTH,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ValAddress {
    /// Account form of this validator: the same bytes under the account prefix.
    pub fn to_account(&self) -> AccAddress {
        AccAddress::from_bytes(self.bytes.clone())
    }
}

impl<K: IdentityKind> From<[u8; ADDRESS_LENGTH]> for Identity<K> {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }
}

impl<K: IdentityKind> fmt::Display for Identity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl<K: IdentityKind> fmt::Debug for Identity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::LABEL, hex::encode(&self.bytes))
    }
}

impl<K: IdentityKind> FromStr for Identity<K> {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl<K: IdentityKind> Serialize for Identity<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de, K: IdentityKind> Deserialize<'de> for Identity<K> {
    /// A blank string decodes to the empty identity so that the message still
    /// parses and is rejected by validation with a field-specific error.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        Self::from_bech32(&s).map_err(de::Error::custom)
    }
}
