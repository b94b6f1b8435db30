use std::{env, fs, path::PathBuf};

use super::ConfigError;

const APP_DIR: &str = "nvmeof";

/// Utility struct for managing configuration file paths
///
/// Provides methods to locate configuration directories and files following
/// the XDG Base Directory specification
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// Follows the XDG Base Directory specification:
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "nvmeof" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| ConfigError::NoConfigDir)?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the application log directory
    ///
    /// Follows `XDG_STATE_HOME`, falling back to `$HOME/.local/state`.
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if no base directory is set or the directory cannot be created
    pub fn log_dir() -> Result<PathBuf, ConfigError> {
        let state_home = env::var("XDG_STATE_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.local/state")))
            .map_err(|_| ConfigError::NoConfigDir)?;

        let log_dir = PathBuf::from(state_home).join(APP_DIR).join("logs");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).map_err(|e| ConfigError::io(e, &log_dir))?;
        }

        Ok(log_dir)
    }
}
