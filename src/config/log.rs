use serde::Serialize;

/// Log configuration for sing-box
#[derive(Serialize, Clone, Debug)]
pub struct Log {
    /// Log level. One of: `trace` `debug` `info` `warn` `error`.
    pub level: LogLevel,

    /// Add time to each line.
    pub timestamp: bool,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            timestamp: true,
        }
    }
}

/// Log level for sing-box logging
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
