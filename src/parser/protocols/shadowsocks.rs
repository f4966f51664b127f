//! Shadowsocks protocol decoder
//!
//! Format: ss://BASE64(method:password)@host:port#remarks

use tracing::trace;

use crate::config::outbound::{Outbound, ShadowsocksOutbound};
use crate::error::{Error, Result};
use crate::parser::base64::decode_base64_str;
use crate::parser::{decode_remarks, ParseContext};

use super::ProtocolParser;

/// Decoder for Shadowsocks (ss://) URIs.
///
/// Extraction is positional, right to left: remarks after the last `#`,
/// port after the last `:`, address after the last `@`, and the remaining
/// prefix is the base64 `method:password` credential blob.
pub struct ShadowsocksParser;

impl ProtocolParser for ShadowsocksParser {
    fn scheme(&self) -> &'static str {
        "ss"
    }

    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound> {
        trace!("Parsing Shadowsocks URI");
        let body = uri
            .strip_prefix("ss://")
            .ok_or_else(|| Error::MalformedUri("missing ss:// prefix".into()))?;

        let (body, fragment) = body.rsplit_once('#').ok_or_else(|| {
            Error::MalformedUri("Shadowsocks URI missing remarks fragment".into())
        })?;
        let remarks = decode_remarks(fragment);

        let (body, port) = body
            .rsplit_once(':')
            .ok_or_else(|| Error::MalformedUri("Shadowsocks URI missing port".into()))?;
        let server_port: u16 = port.parse().map_err(|_| Error::InvalidNumericField {
            field: "port",
            value: port.to_string(),
        })?;

        let (userinfo, server) = body
            .rsplit_once('@')
            .ok_or_else(|| Error::MalformedUri("Shadowsocks URI missing address".into()))?;

        let credentials = decode_base64_str(userinfo)?;
        let (method, password) = credentials.split_once(':').ok_or_else(|| {
            Error::MalformedUri("Shadowsocks credentials missing method:password separator".into())
        })?;

        let tag = ctx.next_tag(&remarks);
        Ok(Outbound::Shadowsocks(ShadowsocksOutbound {
            tag,
            server: server.to_string(),
            server_port,
            method: method.to_string(),
            password: password.to_string(),
        }))
    }
}
