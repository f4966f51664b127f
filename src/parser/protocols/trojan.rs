//! Trojan protocol decoder
//!
//! Format: trojan://password@host:port?params#remarks

use tracing::trace;

use crate::config::outbound::{Outbound, TrojanOutbound};
use crate::config::shared::OutboundTlsConfig;
use crate::error::{Error, Result};
use crate::parser::{decode_remarks, parse_query_params, ParseContext};

use super::{parse_url, ProtocolParser};

/// Decoder for Trojan (trojan://) URIs.
///
/// Only `sni` is consumed from the query; TLS is always enabled and
/// certificate verification stays on.
pub struct TrojanParser;

impl ProtocolParser for TrojanParser {
    fn scheme(&self) -> &'static str {
        "trojan"
    }

    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound> {
        trace!("Parsing Trojan URI");
        let url = parse_url(uri)?;

        let password = url.username().to_string();
        if password.is_empty() {
            return Err(Error::MalformedUri("Trojan URI missing password".into()));
        }

        let server = url
            .host_str()
            .ok_or_else(|| Error::MalformedUri("Trojan URI missing host".into()))?
            .to_string();
        let server_port = url
            .port()
            .ok_or_else(|| Error::MalformedUri("Trojan URI missing port".into()))?;

        let query = url
            .query()
            .ok_or_else(|| Error::MalformedUri("Trojan URI missing query string".into()))?;
        let params = parse_query_params(query)?;

        let remarks = url
            .fragment()
            .map(decode_remarks)
            .ok_or_else(|| Error::MalformedUri("Trojan URI missing remarks fragment".into()))?;
        let tag = ctx.next_tag(&remarks);

        Ok(Outbound::Trojan(TrojanOutbound {
            tag,
            server,
            server_port,
            password,
            tls: OutboundTlsConfig {
                enabled: true,
                server_name: params.get("sni").cloned(),
                ..Default::default()
            },
        }))
    }
}
