//! VMess protocol decoder
//!
//! VMess URIs wrap a base64-encoded JSON object:
//! vmess://BASE64({"ps": ..., "add": ..., "port": ..., "id": ..., "scy": ..., "aid": ...})

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::config::outbound::{Outbound, VMessOutbound};
use crate::error::{Error, Result};
use crate::parser::base64::decode_base64_str;
use crate::parser::ParseContext;

use super::ProtocolParser;

/// VMess URI JSON payload; every key is required.
#[derive(Deserialize, Debug)]
struct VMessPayload {
    /// Remarks/name
    ps: String,
    /// Server address
    add: String,
    /// Server port (number or numeric string)
    port: Value,
    /// UUID
    id: String,
    /// Encryption method
    scy: String,
    /// Alter ID (number or numeric string)
    aid: Value,
}

/// Decoder for VMess (vmess://) URIs.
pub struct VMessParser;

impl ProtocolParser for VMessParser {
    fn scheme(&self) -> &'static str {
        "vmess"
    }

    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound> {
        trace!("Parsing VMess URI");
        let encoded = uri
            .strip_prefix("vmess://")
            .ok_or_else(|| Error::MalformedUri("missing vmess:// prefix".into()))?;

        let decoded = decode_base64_str(encoded)?;
        let payload: VMessPayload = serde_json::from_str(&decoded)
            .map_err(|e| Error::InvalidBase64OrJson(format!("VMess JSON: {e}")))?;

        let server_port = coerce_u16("port", &payload.port)?;
        let alter_id = coerce_u32("aid", &payload.aid)?;
        let tag = ctx.next_tag(payload.ps.trim());

        Ok(Outbound::VMess(VMessOutbound {
            tag,
            server: payload.add,
            server_port,
            uuid: payload.id,
            security: payload.scy,
            alter_id,
        }))
    }
}

/// Coerces a JSON number or base-10 numeric string into a port.
fn coerce_u16(field: &'static str, value: &Value) -> Result<u16> {
    u16::try_from(coerce_u64(field, value)?).map_err(|_| invalid(field, value))
}

/// Coerces a JSON number or base-10 numeric string into an alter id.
fn coerce_u32(field: &'static str, value: &Value) -> Result<u32> {
    u32::try_from(coerce_u64(field, value)?).map_err(|_| invalid(field, value))
}

fn coerce_u64(field: &'static str, value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| invalid(field, value)),
        Value::String(s) => s.parse().map_err(|_| invalid(field, value)),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: &'static str, value: &Value) -> Error {
    Error::InvalidNumericField {
        field,
        value: value.to_string(),
    }
}
