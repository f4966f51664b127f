//! Inbound configuration types.
//!
//! The generated document uses one HTTP inbound per decoded node, bound to
//! loopback on a port from the allocated block.

use serde::Serialize;

/// Represents the inbound types the generated document uses.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inbound {
    /// HTTP inbound
    Http(HttpInbound),
}

impl Inbound {
    /// Tag of the inbound.
    pub fn tag(&self) -> &str {
        match self {
            Inbound::Http(http) => &http.tag,
        }
    }
}

/// HTTP inbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct HttpInbound {
    /// Tag of the inbound
    pub tag: String,

    /// Listen address
    pub listen: String,

    /// Listen port
    pub listen_port: u16,

    /// Enable sniffing
    pub sniff: bool,

    /// Override destination with sniffed domain
    pub sniff_override_destination: bool,
}

impl HttpInbound {
    /// Creates a loopback HTTP inbound with sniffing enabled.
    pub fn new(tag: impl Into<String>, listen_port: u16) -> Self {
        Self {
            tag: tag.into(),
            listen: "127.0.0.1".to_string(),
            listen_port,
            sniff: true,
            sniff_override_destination: true,
        }
    }
}
