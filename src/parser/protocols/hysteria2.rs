//! Hysteria2 protocol decoder
//!
//! Format: hysteria2://password@host:port?params#remarks

use tracing::trace;

use crate::config::outbound::{Hysteria2Outbound, Outbound};
use crate::config::shared::OutboundTlsConfig;
use crate::error::{Error, Result};
use crate::parser::{decode_remarks, parse_query_params, ParseContext};

use super::{parse_url, ProtocolParser};

/// Decoder for Hysteria2 (hysteria2://) URIs.
///
/// Consumes `sni` and `insecure` from the query; TLS is always enabled.
pub struct Hysteria2Parser;

impl ProtocolParser for Hysteria2Parser {
    fn scheme(&self) -> &'static str {
        "hysteria2"
    }

    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound> {
        trace!("Parsing Hysteria2 URI");
        let url = parse_url(uri)?;

        let password = url.username().to_string();
        if password.is_empty() {
            return Err(Error::MalformedUri("Hysteria2 URI missing password".into()));
        }

        let server = url
            .host_str()
            .ok_or_else(|| Error::MalformedUri("Hysteria2 URI missing host".into()))?
            .to_string();
        let server_port = url
            .port()
            .ok_or_else(|| Error::MalformedUri("Hysteria2 URI missing port".into()))?;

        let query = url
            .query()
            .ok_or_else(|| Error::MalformedUri("Hysteria2 URI missing query string".into()))?;
        let params = parse_query_params(query)?;

        let remarks = url
            .fragment()
            .map(decode_remarks)
            .ok_or_else(|| Error::MalformedUri("Hysteria2 URI missing remarks fragment".into()))?;
        let tag = ctx.next_tag(&remarks);

        // Coerced by string truthiness: any non-empty value, the literal
        // "false" included, enables it. TODO: confirm the intended semantics
        // before switching to a real boolean parse; it changes generated
        // configs.
        let insecure = params.get("insecure").is_some_and(|v| !v.is_empty());

        Ok(Outbound::Hysteria2(Hysteria2Outbound {
            tag,
            server,
            server_port,
            password,
            tls: OutboundTlsConfig {
                enabled: true,
                server_name: params.get("sni").cloned(),
                insecure,
                ..Default::default()
            },
        }))
    }
}
