//! Protocol decoders
//!
//! One decoder per supported node URI scheme, each implementing the
//! [`ProtocolParser`] trait, plus the registry that dispatches lines to the
//! matching decoder by scheme prefix.

mod hysteria2;
mod shadowsocks;
mod trojan;
mod vless;
mod vmess;

pub use hysteria2::Hysteria2Parser;
pub use shadowsocks::ShadowsocksParser;
pub use trojan::TrojanParser;
pub use vless::VLessParser;
pub use vmess::VMessParser;

use anyhow::Context;
use tracing::debug;
use url::Url;

use crate::config::outbound::Outbound;
use crate::error::{Error, Result};
use crate::parser::ParseContext;

// ============================================================================
// Protocol Parser Trait
// ============================================================================

/// Trait for parsing individual protocol URIs
pub trait ProtocolParser: Send + Sync {
    /// Returns the protocol scheme this parser handles (e.g., "ss", "vmess")
    fn scheme(&self) -> &'static str;

    /// Parses a URI string into an Outbound configuration
    fn parse(&self, uri: &str, ctx: &mut ParseContext) -> Result<Outbound>;

    /// Checks if this parser can handle the given URI
    fn can_parse(&self, uri: &str) -> bool {
        uri.starts_with(&format!("{}://", self.scheme()))
    }
}

// ============================================================================
// Protocol Registry
// ============================================================================

/// Registry of protocol decoders, dispatched by scheme prefix in a fixed
/// order.
pub struct ProtocolRegistry {
    parsers: Vec<Box<dyn ProtocolParser>>,
}

impl ProtocolRegistry {
    /// Creates a registry with all built-in decoders, in dispatch order.
    pub fn with_builtin_parsers() -> Self {
        Self {
            parsers: vec![
                Box::new(VLessParser),
                Box::new(VMessParser),
                Box::new(ShadowsocksParser),
                Box::new(TrojanParser),
                Box::new(Hysteria2Parser),
            ],
        }
    }

    /// Finds the first decoder whose scheme prefix matches the line.
    pub fn find(&self, line: &str) -> Option<&dyn ProtocolParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(line))
            .map(|p| p.as_ref())
    }

    /// Decodes every recognized line of `content` in file order.
    ///
    /// Blank lines and lines with an unrecognized scheme are skipped; a
    /// decode failure on a recognized line fails the whole batch, reporting
    /// the offending line.
    pub fn parse_lines(
        &self,
        content: &str,
        ctx: &mut ParseContext,
    ) -> anyhow::Result<Vec<Outbound>> {
        let mut outbounds = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(parser) = self.find(line) else {
                debug!("Skipping unrecognized line {}: {:?}", index + 1, line);
                continue;
            };
            let outbound = parser
                .parse(line, ctx)
                .with_context(|| format!("line {}: failed to decode {:?}", index + 1, line))?;
            debug!(
                "Decoded {} node '{}' from line {}",
                parser.scheme(),
                outbound.tag(),
                index + 1
            );
            outbounds.push(outbound);
        }
        Ok(outbounds)
    }
}

// ============================================================================
// Shared URI Helpers
// ============================================================================

/// Parses a URL-shaped node URI into its components.
///
/// A non-numeric port is reported as a numeric-field error; every other
/// parse failure is a malformed URI.
pub(crate) fn parse_url(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|e| match e {
        url::ParseError::InvalidPort => Error::InvalidNumericField {
            field: "port",
            value: uri.to_string(),
        },
        other => Error::MalformedUri(other.to_string()),
    })
}
