//! # Wire Decoding
//!
//! Parses the amino-JSON envelope (`{"type":"oracle/<Name>","value":{...}}`)
//! into a [`Msg`]. Key order and whitespace are free on input. Decoding does
//! not validate; run `validate` or `into_validated` on the result.

use super::messages::Msg;
use thiserror::Error;

/// Errors decoding a message from its wire form.
#[derive(Debug, Error)]
pub enum WireError {
    /// Malformed JSON, unknown `type`, or a field that failed to decode
    /// (bad bech32, bad base64, non-numeric id).
    #[error("malformed oracle message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode one message envelope.
pub fn decode_msg(bytes: &[u8]) -> Result<Msg, WireError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode either a single envelope or a JSON array of envelopes.
pub fn decode_msgs(bytes: &[u8]) -> Result<Vec<Msg>, WireError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(WireError::from))
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}
