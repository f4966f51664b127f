//! Base64 decoding helpers
//!
//! Subscription sources mix standard and URL-safe alphabets and frequently
//! drop padding, so decoding tries the common variants before giving up.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::{Error, Result};

/// Decodes base64 content, trying multiple variants.
pub fn decode_base64(content: &str) -> Result<Vec<u8>> {
    // Remove all whitespace (handles line breaks within base64)
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();

    if let Ok(decoded) = STANDARD.decode(&cleaned) {
        return Ok(decoded);
    }
    if let Ok(decoded) = URL_SAFE.decode(&cleaned) {
        return Ok(decoded);
    }
    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(&cleaned) {
        return Ok(decoded);
    }

    // Retry with padding restored
    let padded = add_base64_padding(&cleaned);
    if let Ok(decoded) = STANDARD.decode(&padded) {
        return Ok(decoded);
    }
    URL_SAFE.decode(&padded).map_err(|_| {
        Error::InvalidBase64OrJson("content is not valid base64 in any supported variant".into())
    })
}

/// Decodes base64 content into a UTF-8 string.
pub fn decode_base64_str(content: &str) -> Result<String> {
    String::from_utf8(decode_base64(content)?)
        .map_err(|_| Error::InvalidBase64OrJson("decoded payload is not valid UTF-8".into()))
}

/// Adds proper padding to a base64 string if missing.
fn add_base64_padding(s: &str) -> String {
    let mut result = s.to_string();
    while result.len() % 4 != 0 {
        result.push('=');
    }
    result
}
