//! VLESS protocol decoder
//!
//! Format: vless://uuid@host:port?params#remarks

use std::collections::HashMap;

use tracing::trace;

use crate::config::outbound::{Outbound, V2RayTransport, VLessOutbound, WebSocketTransport};
use crate::config::shared::{OutboundRealityConfig, OutboundTlsConfig, UtlsConfig};
use crate::error::{Error, Result};
use crate::parser::{decode_remarks, parse_query_params, percent_decode, ParseContext};

use super::{parse_url, ProtocolParser};

/// Decoder for VLESS (vless://) URIs.
///
/// The TLS block is always emitted, with the uTLS fingerprint taken from
/// `fp`. `security=reality` adds the reality block and the top-level flow;
/// `security=tls` adds either a WebSocket transport (`type=ws`) or the
/// top-level flow (`type=tcp`).
pub struct VLessParser;

impl ProtocolParser for VLessParser {
    fn scheme(&self) -> &'static str {
        "vless"
    }

    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound> {
        trace!("Parsing VLESS URI");
        let url = parse_url(uri)?;

        let uuid = url.username().to_string();
        if uuid.is_empty() {
            return Err(Error::MalformedUri("VLESS URI missing UUID".into()));
        }

        let server = url
            .host_str()
            .ok_or_else(|| Error::MalformedUri("VLESS URI missing host".into()))?
            .to_string();
        let server_port = url
            .port()
            .ok_or_else(|| Error::MalformedUri("VLESS URI missing port".into()))?;

        let query = url
            .query()
            .ok_or_else(|| Error::MalformedUri("VLESS URI missing query string".into()))?;
        let params = parse_query_params(query)?;

        let remarks = url
            .fragment()
            .map(decode_remarks)
            .ok_or_else(|| Error::MalformedUri("VLESS URI missing remarks fragment".into()))?;
        let tag = ctx.next_tag(&remarks);

        let flow = params.get("flow").cloned();
        let security = params.get("security").map(String::as_str).unwrap_or("");

        let mut tls = OutboundTlsConfig {
            enabled: true,
            server_name: params.get("sni").cloned(),
            utls: Some(UtlsConfig {
                enabled: true,
                fingerprint: params.get("fp").cloned(),
            }),
            ..Default::default()
        };

        // Reality and TLS-over-TCP nodes always carry the flow key, null
        // when the parameter is absent.
        let mut top_level_flow = None;
        let mut transport = None;
        match security {
            "reality" => {
                tls.reality = Some(OutboundRealityConfig {
                    enabled: true,
                    public_key: params.get("pbk").cloned(),
                    short_id: params.get("sid").cloned(),
                });
                top_level_flow = Some(flow);
            }
            "tls" => match params.get("type").map(String::as_str) {
                Some("ws") => transport = Some(build_ws_transport(&params)),
                Some("tcp") => top_level_flow = Some(flow),
                _ => {}
            },
            _ => {}
        }

        Ok(Outbound::VLess(VLessOutbound {
            tag,
            server,
            server_port,
            uuid,
            packet_encoding: "xudp".to_string(),
            tls,
            flow: top_level_flow,
            transport,
        }))
    }
}

fn build_ws_transport(params: &HashMap<String, String>) -> V2RayTransport {
    let mut headers = HashMap::new();
    if let Some(host) = params.get("host") {
        headers.insert("Host".to_string(), host.clone());
    }
    V2RayTransport::WebSocket(WebSocketTransport {
        path: params.get("path").map(|p| percent_decode(p)),
        headers,
    })
}
