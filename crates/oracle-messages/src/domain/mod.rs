//! # Domain Layer - Oracle Messages
//!
//! Pure message logic: the nine oracle messages, their stateless validation
//! rules and the canonical sign-bytes encoding.
//!
//! ## Components
//!
//! - `address`: bech32 account and validator identities
//! - `constants`: field limits and the `[do-not-modify]` sentinel
//! - `messages`: message structs and the `Msg` union
//! - `validators`: reusable field checks
//! - `validated`: `ValidatedMsg`, the only source of sign bytes
//! - `canonical`: sorted-key compact JSON encoder
//! - `wire`: amino-JSON envelope decoding
//! - `errors`: `ValidationError`

pub mod address;
pub(crate) mod canonical;
pub mod constants;
pub mod errors;
pub mod messages;
pub mod validated;
pub mod validators;
pub mod wire;

pub use address::*;
pub use constants::*;
pub use errors::*;
pub use messages::*;
pub use validated::*;
pub use wire::*;
