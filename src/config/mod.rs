//! Configuration schema definitions and loading.
//!
//! Defines the configuration structure of the CLI: general settings, the
//! mapper depth ceiling, and gateway settings. All configurations are
//! serializable to/from TOML format and every field has a default.

mod error;
mod general;
mod loading;
mod paths;


pub use error::ConfigError;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use std::{collections::BTreeMap, path::PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mapper::DEFAULT_MAX_DEPTH;

/// Main configuration structure.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Response shaping settings.
    #[serde(default)]
    pub mapper: MapperConfig,

    /// Gateway settings.
    #[serde(default)]
    pub gateway: GatewaySettings,
}

/// Response shaping settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MapperConfig {
    /// Deepest nesting level followed when shaping gateway responses.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Gateway settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GatewaySettings {
    /// Gateway group commands are sent to. When set, `gateway list` shows
    /// only this group.
    #[serde(default)]
    pub group: Option<String>,

    /// JSON file of canned gateway responses, for offline runs.
    #[serde(default)]
    pub replay_file: Option<PathBuf>,

    /// Known gateways, by group name.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<GatewayEntry>>,
}

/// A known gateway daemon.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GatewayEntry {
    /// Gateway name.
    pub name: String,

    /// Address of the gateway's management service, `host:port`.
    pub service_url: String,

    /// Name of the daemon running the gateway.
    #[serde(default)]
    pub daemon_name: Option<String>,
}
