//! # Canonical Encoding
//!
//! Produces the exact bytes a signer signs for an oracle message:
//!
//! ```text
//! {"type":"oracle/<Name>","value":{<fields, keys sorted bytewise>}}
//! ```
//!
//! The shape comes from the serde derives on the message types, so the wire
//! form and the signed form cannot drift apart. Encoding goes through a
//! [`serde_json::Value`] first: its map is ordered by key, which gives the
//! bytewise key order at every nesting level. `raw_reports` stays an array in
//! submission order.
//!
//! String escaping follows the escaper the reference verifiers use: HTML
//! characters `<`, `>`, `&` and the line separators U+2028/U+2029 are written
//! as `\uXXXX`, control characters other than `\n`, `\r`, `\t` as `\u00xx`.
//!
//! Only reachable through [`ValidatedMsg`](super::validated::ValidatedMsg), so
//! unvalidated messages are never signed.

use super::messages::Msg;
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, Serializer};
use std::io;

/// Compact JSON formatter with the verifier-compatible string escapes.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escape)?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Backspace => writer.write_all(b"\\u0008"),
            CharEscape::FormFeed => writer.write_all(b"\\u000c"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Serialize `value` with sorted object keys and canonical escapes.
pub(crate) fn to_canonical_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let sorted = serde_json::to_value(value)?;
    let mut out = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut out, CanonicalFormatter);
    sorted.serialize(&mut serializer)?;
    Ok(out)
}

/// Sign bytes of the full `{"type","value"}` envelope.
pub(crate) fn sign_bytes(msg: &Msg) -> Vec<u8> {
    // Every field is a string, an integer or a list of string-keyed objects.
    to_canonical_vec(msg).expect("oracle messages serialize to string-keyed JSON")
}
