//! Request checksums for the payment gateway.
//!
//! The gateway authenticates every request by recomputing an HMAC-SHA256 over the JSON `body` of the request, using the
//! merchant key as the secret, and comparing it against the base64 `head.signature` field. Both sides must therefore
//! agree on the exact bytes of the body. This module fixes those bytes with a *canonical* encoding:
//!
//! * no insignificant whitespace (`{"a":1,"b":[1,2]}`),
//! * object keys sorted lexicographically at every level of nesting,
//! * every character outside printable ASCII written as a `\uXXXX` escape (UTF-16 surrogate pairs above U+FFFF),
//!   so `"Zoë"` is encoded as `"Zo\u00eb"`.
//!
//! The canonical form depends only on the logical content of the body, so two bodies built in a different field order
//! produce the same signature.
use std::io;

use base64::encode;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::{ser::Formatter, Map, Serializer, Value};
use sha2::Sha256;
use thiserror::Error;
use upg_common::Secret;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Error)]
pub enum SignatureError {
    #[error("Could not encode the request body canonically. {0}")]
    Serialization(String),
    #[error("The signing key is not valid. {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for SignatureError {
    fn from(e: serde_json::Error) -> Self {
        SignatureError::Serialization(e.to_string())
    }
}

/// Converts `body` into a JSON value whose objects have their keys in sorted order.
pub fn canonical_value<T: Serialize + ?Sized>(body: &T) -> Result<Value, SignatureError> {
    let value = serde_json::to_value(body)?;
    Ok(sort_keys(value))
}

/// The exact text that is signed, and sent, for `body`.
pub fn canonical_json<T: Serialize + ?Sized>(body: &T) -> Result<String, SignatureError> {
    let value = canonical_value(body)?;
    ascii_json(&value)
}

/// Compact JSON with everything outside printable ASCII escaped. Field order is left as `value` serializes it.
pub fn ascii_json<T: Serialize + ?Sized>(value: &T) -> Result<String, SignatureError> {
    let mut ser = Serializer::with_formatter(Vec::with_capacity(128), AsciiFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(ser.into_inner()).map_err(|e| SignatureError::Serialization(e.to_string()))
}

/// A compact formatter that writes non-ASCII characters (and DEL) as `\uXXXX` escapes.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() && c != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries = map.into_iter().collect::<Vec<(String, Value)>>();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted = entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<String, Value>>();
            Value::Object(sorted)
        },
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn keyed_mac(secret: &Secret<String>) -> Result<HmacSha256, SignatureError> {
    HmacSha256::new_from_slice(secret.reveal().as_bytes()).map_err(|e| SignatureError::InvalidKey(e.to_string()))
}

/// Signs `body` with the merchant key. The result is the base64 encoding of the raw HMAC-SHA256 output.
pub fn sign<T: Serialize + ?Sized>(body: &T, secret: &Secret<String>) -> Result<String, SignatureError> {
    let data = canonical_json(body)?;
    let mut mac = keyed_mac(secret)?;
    mac.update(data.as_bytes());
    Ok(encode(mac.finalize().into_bytes()))
}
