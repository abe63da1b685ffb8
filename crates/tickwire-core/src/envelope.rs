//! The two-shape boundary envelope.
//!
//! Every resolution call emits exactly one envelope buffer. Success and
//! failure use different, frozen key casings (a quirk inherited from the
//! deployed wire format); both shapes uphold the same invariant: exactly
//! one of the error string and the value payload is populated.

use serde::Serialize;

use crate::error::ResolveError;

/// Guard message substituted when a failure is encoded without one.
/// Wire-visible; the spelling is frozen.
pub const EMPTY_FAILURE_MESSAGE: &str = "encodeFailure invoked with empty error";

/// Outcome of one resolution call, as a proper sum type rather than a
/// record with optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T: Serialize> Outcome<T> {
    /// Serializes this outcome into its wire envelope.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Success(value) => encode_success(value),
            Self::Failure(message) => encode_failure(message),
        }
    }
}

impl<T> From<Result<T, ResolveError>> for Outcome<T> {
    fn from(result: Result<T, ResolveError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SuccessEnvelope<'a, T> {
    success: bool,
    error: &'a str,
    value: &'a T,
}

/// Encodes a success envelope: `{"success": true, "error": "", "value": …}`.
///
/// A value that cannot serialize degrades to a failure envelope carrying
/// the serialization error, so the boundary still receives parsable bytes;
/// the degrade emits a diagnostic but is otherwise silent.
pub fn encode_success<T: Serialize>(value: &T) -> Vec<u8> {
    let envelope = SuccessEnvelope {
        success: true,
        error: "",
        value,
    };

    match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, "success value failed to serialize; degrading to failure envelope");
            encode_failure(&format!("marshalling result: {error}"))
        }
    }
}

/// Encodes the fixed failure template:
/// `{ "Success": false, "Error": "<message>" , "Value": null }`.
///
/// Hand-built rather than serialized so this path can never itself fail.
/// The message is escaped locally; the template bytes (casing and spacing
/// included) are frozen wire format.
pub fn encode_failure(message: &str) -> Vec<u8> {
    let message = if message.trim().is_empty() {
        EMPTY_FAILURE_MESSAGE
    } else {
        message
    };

    let mut out = Vec::with_capacity(message.len() + 48);
    out.extend_from_slice(br#"{ "Success": false, "Error": ""#);
    escape_json_into(message, &mut out);
    out.extend_from_slice(br#"" , "Value": null }"#);
    out
}

fn escape_json_into(input: &str, out: &mut Vec<u8>) {
    let mut utf8 = [0u8; 4];
    for ch in input.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 => {
                out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
            }
            c => out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
        }
    }
}
