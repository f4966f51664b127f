//! Config generation
//!
//! Orchestrates the conversion: read the node list, decode every URI in
//! file order, allocate one block of listen ports, pair every outbound with
//! an HTTP inbound and a routing rule, and write the final document.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::inbound::{HttpInbound, Inbound};
use crate::config::log::Log;
use crate::config::outbound::Outbound;
use crate::config::route::{Route, RouteRule};
use crate::config::SingBoxConfig;
use crate::parser::{ParseContext, ProtocolRegistry};
use crate::ports::find_free_block;

/// Summary of a completed run, reported to the user.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    /// First port of the allocated inbound block
    pub start_port: u16,

    /// Number of decoded nodes
    pub node_count: usize,
}

/// Generator that orchestrates the conversion process
pub struct Generator {
    input: PathBuf,
    output: PathBuf,
    start_port: u16,
}

impl Generator {
    /// Creates a generator reading `input` and writing `output`, scanning
    /// for free ports upward from `start_port`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, start_port: u16) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            start_port,
        }
    }

    /// Builds the full document without writing it.
    pub fn generate(&self) -> Result<(SingBoxConfig, Summary)> {
        info!("Starting config generation");

        let content = fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read node list {}", self.input.display()))?;

        // Fresh decode state per run; the tag sequence starts at zero.
        let mut ctx = ParseContext::new();
        let registry = ProtocolRegistry::with_builtin_parsers();
        let outbounds = registry.parse_lines(&content, &mut ctx)?;
        debug!("Decoded {} outbounds", outbounds.len());

        let start_port = find_free_block(self.start_port, outbounds.len())
            .context("Failed to allocate listen ports")?;
        debug!(
            "Allocated {} ports starting at {}",
            outbounds.len(),
            start_port
        );

        let inbounds = build_inbounds(&outbounds, start_port);
        let route = build_route(&inbounds);

        let summary = Summary {
            start_port,
            node_count: outbounds.len(),
        };
        let config = SingBoxConfig {
            log: Log::default(),
            inbounds,
            outbounds,
            route,
        };
        Ok((config, summary))
    }

    /// Builds the document and writes it to the output path.
    ///
    /// Nothing is written until the whole document has been assembled, so a
    /// decode or allocation failure leaves no partial output behind.
    pub fn run(&self) -> Result<Summary> {
        let (config, summary) = self.generate()?;
        let json = config
            .to_json_pretty()
            .context("Failed to serialize config")?;
        fs::write(&self.output, json)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        Ok(summary)
    }
}

/// One HTTP inbound per outbound, on sequential ports in decode order.
fn build_inbounds(outbounds: &[Outbound], start_port: u16) -> Vec<Inbound> {
    outbounds
        .iter()
        .zip(start_port..=u16::MAX)
        .map(|(outbound, port)| Inbound::Http(HttpInbound::new(in_bound_tag(outbound.tag()), port)))
        .collect()
}

/// One routing rule per inbound, referencing the paired outbound by tag.
fn build_route(inbounds: &[Inbound]) -> Route {
    let rules = inbounds
        .iter()
        .map(|inbound| RouteRule {
            inbound: inbound.tag().to_string(),
            outbound: out_bound_tag(inbound.tag()),
        })
        .collect();
    Route { rules }
}

fn in_bound_tag(tag: &str) -> String {
    tag.replace("out_bound", "in_bound")
}

fn out_bound_tag(tag: &str) -> String {
    tag.replace("in_bound", "out_bound")
}
