//! Outbound configuration types.
//!
//! One variant per supported node protocol. Serialization is tagged by the
//! `type` field, matching the sing-box outbound format.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::shared::OutboundTlsConfig;

/// Represents the outbound types the decoders produce.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outbound {
    /// VLESS outbound
    #[serde(rename = "vless")]
    VLess(VLessOutbound),
    /// VMess outbound
    #[serde(rename = "vmess")]
    VMess(VMessOutbound),
    /// Shadowsocks outbound
    Shadowsocks(ShadowsocksOutbound),
    /// Trojan outbound
    Trojan(TrojanOutbound),
    /// Hysteria2 outbound
    Hysteria2(Hysteria2Outbound),
}

impl Outbound {
    /// Tag of the outbound.
    pub fn tag(&self) -> &str {
        match self {
            Outbound::VLess(o) => &o.tag,
            Outbound::VMess(o) => &o.tag,
            Outbound::Shadowsocks(o) => &o.tag,
            Outbound::Trojan(o) => &o.tag,
            Outbound::Hysteria2(o) => &o.tag,
        }
    }
}

/// VLESS outbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct VLessOutbound {
    /// Tag of the outbound
    pub tag: String,

    /// Server address
    pub server: String,

    /// Server port
    pub server_port: u16,

    /// VLESS user id
    pub uuid: String,

    /// UDP packet encoding
    pub packet_encoding: String,

    /// TLS configuration (always present for VLESS)
    pub tls: OutboundTlsConfig,

    /// Flow control. Reality and TLS-over-TCP nodes always carry the key,
    /// serialized as `null` when the URI has no `flow` parameter; other
    /// nodes omit it entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<Option<String>>,

    /// V2Ray transport (TLS + WebSocket nodes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

/// VMess outbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct VMessOutbound {
    /// Tag of the outbound
    pub tag: String,

    /// Server address
    pub server: String,

    /// Server port
    pub server_port: u16,

    /// VMess user id
    pub uuid: String,

    /// Encryption method
    pub security: String,

    /// Legacy alter id
    pub alter_id: u32,
}

/// Shadowsocks outbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct ShadowsocksOutbound {
    /// Tag of the outbound
    pub tag: String,

    /// Server address
    pub server: String,

    /// Server port
    pub server_port: u16,

    /// Encryption method
    pub method: String,

    /// Password
    pub password: String,
}

/// Trojan outbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct TrojanOutbound {
    /// Tag of the outbound
    pub tag: String,

    /// Server address
    pub server: String,

    /// Server port
    pub server_port: u16,

    /// Password
    pub password: String,

    /// TLS configuration (always enabled for Trojan)
    pub tls: OutboundTlsConfig,
}

/// Hysteria2 outbound configuration
#[derive(Serialize, Clone, Debug)]
pub struct Hysteria2Outbound {
    /// Tag of the outbound
    pub tag: String,

    /// Server address
    pub server: String,

    /// Server port
    pub server_port: u16,

    /// Password
    pub password: String,

    /// TLS configuration (always enabled for Hysteria2)
    pub tls: OutboundTlsConfig,
}

/// V2Ray transport configuration, tagged by transport type.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum V2RayTransport {
    /// WebSocket transport
    #[serde(rename = "ws")]
    WebSocket(WebSocketTransport),
}

/// WebSocket transport configuration
#[derive(Serialize, Clone, Debug, Default)]
pub struct WebSocketTransport {
    /// HTTP request path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Extra request headers (Host)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}
