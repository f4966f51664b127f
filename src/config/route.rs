//! Route configuration types.

use serde::Serialize;

/// Route configuration: one rule per inbound/outbound pair.
#[derive(Serialize, Clone, Debug, Default)]
pub struct Route {
    /// List of route rules
    pub rules: Vec<RouteRule>,
}

/// Binds one inbound to the outbound it fronts, by tag reference.
#[derive(Serialize, Clone, Debug)]
pub struct RouteRule {
    /// Matched inbound tag
    pub inbound: String,

    /// Target outbound tag
    pub outbound: String,
}
