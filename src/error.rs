//! Error types for splitbox

use thiserror::Error;

/// Errors produced while decoding node URIs or allocating listen ports.
#[derive(Error, Debug)]
pub enum Error {
    /// A required positional token (fragment, query, host, credential) is
    /// absent, or a query parameter lacks its `=` separator.
    #[error("malformed URI: {0}")]
    MalformedUri(String),

    /// A field that must be base-10 numeric (port, alter id) is not.
    #[error("invalid numeric field `{field}`: {value:?}")]
    InvalidNumericField { field: &'static str, value: String },

    /// A base64 or JSON payload (vmess body, ss credential blob) failed to
    /// decode.
    #[error("invalid base64 or JSON payload: {0}")]
    InvalidBase64OrJson(String),

    /// The free-port scan reached the end of the port space without finding
    /// a contiguous block.
    #[error("no contiguous block of {count} free ports found scanning up from {start}")]
    PortAllocationExhausted { start: u16, count: usize },
}

/// Result type alias for splitbox
pub type Result<T> = std::result::Result<T, Error>;
