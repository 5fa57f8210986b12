//! Reversible encoding of the stored admin credential
//!
//! Plain base64. This only keeps the value from being stored verbatim; it is
//! not a protection.

use base64::{engine::general_purpose::STANDARD, Engine};

pub fn encode(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

/// `None` when the stored value is not base64 of UTF-8 text
pub fn decode(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}
