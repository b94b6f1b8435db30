use std::{
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while locating, reading, or parsing configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set")]
    NoConfigDir,

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Import operation error with file context
    #[error("failed to import '{path}': {details}")]
    Import {
        /// Path of file being imported
        path: PathBuf,
        /// Import error details
        details: String,
    },

    /// A file imports itself, directly or transitively.
    #[error("circular import: {chain}")]
    CircularImport {
        /// Import chain ending at the repeated file
        chain: String,
    },

    /// The merged configuration does not match the schema.
    #[error("invalid configuration: {details}")]
    Validation {
        /// Validation error details
        details: String,
    },
}

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => p.to_string_lossy().to_string(),
            None => "string".to_string(),
        };

        ConfigError::TomlParse {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an import error with file path context.
    pub fn import(error: impl fmt::Display, path: &Path) -> Self {
        ConfigError::Import {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
