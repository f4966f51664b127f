//! Node URI decoding
//!
//! This module provides:
//! - Per-run decode state ([`ParseContext`]) carrying the tag sequence counter
//! - Strict query-string splitting shared by the URL-shaped decoders
//! - Percent-decoding helpers for remarks and path parameters
//!
//! The per-protocol decoders and their dispatch registry live in
//! [`protocols`].

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{Error, Result};

pub mod base64;
pub mod protocols;

pub use protocols::{ProtocolParser, ProtocolRegistry};

// ============================================================================
// Parse Context
// ============================================================================

/// Per-run decode state shared by every protocol decoder.
///
/// Owns the tag sequence counter, so repeated runs and concurrent tests stay
/// isolated from each other.
#[derive(Debug, Default)]
pub struct ParseContext {
    seq: u32,
}

impl ParseContext {
    /// Creates a fresh context with the sequence counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes decoded so far.
    pub fn count(&self) -> u32 {
        self.seq
    }

    /// Builds the tag for the next decoded node: `out_bound_<seq>_<remarks>`.
    ///
    /// `seq` is 1-based and increases once per decode across all protocols,
    /// which keeps tags unique even when remarks collide.
    pub fn next_tag(&mut self, remarks: &str) -> String {
        self.seq += 1;
        format!("out_bound_{}_{}", self.seq, remarks)
    }
}

// ============================================================================
// Shared Decoding Helpers
// ============================================================================

/// Percent-decodes a URI component, falling back to the raw text if the
/// encoding is invalid.
pub fn percent_decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| value.to_string())
}

/// Decodes a fragment into a display label: percent-decoded and
/// whitespace-trimmed.
pub fn decode_remarks(fragment: &str) -> String {
    percent_decode(fragment).trim().to_string()
}

/// Splits a raw query string into a key/value map.
///
/// Every `&`-separated item must contain a `=` separator; an item without
/// one fails the decode rather than being skipped. Later duplicates of a key
/// overwrite earlier ones. Values are kept percent-encoded; decoders decode
/// the individual fields that need it.
pub fn parse_query_params(query: &str) -> Result<HashMap<String, String>> {
    let mut params = HashMap::new();
    for item in query.split('&') {
        let (key, value) = item.split_once('=').ok_or_else(|| {
            Error::MalformedUri(format!("query parameter {item:?} is missing `=`"))
        })?;
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}
