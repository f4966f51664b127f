//! Shared field structures for sing-box configuration.
//!
//! Reusable blocks embedded in multiple outbound types.

use serde::Serialize;

/// TLS configuration for outbound (client) connections.
///
/// `enabled` and `insecure` are always emitted; the consuming engine
/// expects them present whenever the block itself is.
#[derive(Serialize, Clone, Debug, Default)]
pub struct OutboundTlsConfig {
    /// Enable TLS
    pub enabled: bool,

    /// Server name for verification and SNI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    /// Accept any server certificate (insecure)
    pub insecure: bool,

    /// uTLS configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utls: Option<UtlsConfig>,

    /// Reality configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality: Option<OutboundRealityConfig>,
}

/// uTLS fingerprint mimicry configuration.
#[derive(Serialize, Clone, Debug, Default)]
pub struct UtlsConfig {
    /// Enable uTLS
    pub enabled: bool,

    /// Fingerprint to use: chrome, firefox, edge, safari, ios, android, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Reality configuration for outbound (client).
#[derive(Serialize, Clone, Debug, Default)]
pub struct OutboundRealityConfig {
    /// Enable Reality
    pub enabled: bool,

    /// Public key (generated by `sing-box generate reality-keypair`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Short ID (hex string, 0-8 digits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}
