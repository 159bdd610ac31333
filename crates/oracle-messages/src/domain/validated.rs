//! # Validated Messages
//!
//! `ValidatedMsg` can only be built by running validation, and it is the only
//! type that exposes sign bytes. A message that skipped `validate` therefore
//! cannot be encoded for signing:
//!
//! ```ignore
//! let validated: ValidatedMsg = msg.into_validated()?; // runs every check
//! let bytes = validated.sign_bytes();                  // total from here on
//! ```

use super::address::AccAddress;
use super::canonical;
use super::errors::ValidationError;
use super::messages::Msg;
use sha2::{Digest, Sha256};

/// A message that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMsg {
    msg: Msg,
}

impl ValidatedMsg {
    pub fn msg(&self) -> &Msg {
        &self.msg
    }

    pub fn into_inner(self) -> Msg {
        self.msg
    }

    pub fn signer(&self) -> AccAddress {
        self.msg.signer()
    }

    /// Canonical envelope bytes that the signer signs.
    pub fn sign_bytes(&self) -> Vec<u8> {
        canonical::sign_bytes(&self.msg)
    }

    /// SHA-256 of [`Self::sign_bytes`], the digest secp256k1 signers sign.
    pub fn sign_bytes_digest(&self) -> [u8; 32] {
        Sha256::digest(self.sign_bytes()).into()
    }
}

impl Msg {
    /// Validate and, on success, seal the message as [`ValidatedMsg`].
    pub fn into_validated(self) -> Result<ValidatedMsg, ValidationError> {
        self.validate()?;
        Ok(ValidatedMsg { msg: self })
    }
}

impl TryFrom<Msg> for ValidatedMsg {
    type Error = ValidationError;

    fn try_from(msg: Msg) -> Result<Self, Self::Error> {
        msg.into_validated()
    }
}

impl AsRef<Msg> for ValidatedMsg {
    fn as_ref(&self) -> &Msg {
        &self.msg
    }
}
