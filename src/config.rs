use serde::Serialize;

use crate::config::inbound::Inbound;
use crate::config::log::Log;
use crate::config::outbound::Outbound;
use crate::config::route::Route;

pub mod inbound;
pub mod log;
pub mod outbound;
pub mod route;
pub mod shared;

/// Root sing-box configuration document.
///
/// Every top-level key is always emitted, even for an empty node list, so
/// the consuming engine always sees a complete document.
#[derive(Serialize, Clone, Debug, Default)]
pub struct SingBoxConfig {
    /// Log configuration (static: info level, timestamps on)
    pub log: Log,

    /// One HTTP inbound per decoded node
    pub inbounds: Vec<Inbound>,

    /// Decoded proxy outbounds, in node-list order
    pub outbounds: Vec<Outbound>,

    /// Routing rules pairing each inbound with its outbound
    pub route: Route,
}

impl SingBoxConfig {
    /// Serialize the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
