use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General configuration settings.
///
/// Contains global settings that affect the overall behavior of the CLI,
/// such as logging and access level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GeneralConfig {
    /// Logging level; `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Also write logs to a daily rotated file in the log directory.
    #[serde(default)]
    pub log_file: bool,

    /// Refuse commands that change gateway state.
    #[serde(default)]
    pub read_only: bool,
}

/// Logging level for the application.
///
/// Controls the verbosity of log output, from critical errors only
/// to detailed trace information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only show errors.
    Error,

    /// Show warnings and errors (default level, keeps CLI output quiet).
    #[default]
    Warn,

    /// Show informational messages, warnings, and errors.
    Info,

    /// Show debug information useful for troubleshooting.
    Debug,

    /// Show detailed trace information (very verbose).
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
