use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::{Value, map::Map};
use tracing::{debug, info, instrument};

use super::{Config, ConfigError, ConfigPaths};

impl Config {
    /// Loads the main configuration file, or defaults when it does not exist.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined or the
    /// file exists but cannot be loaded (see [`Config::load_with_imports`]).
    #[instrument]
    pub fn load() -> Result<Config, ConfigError> {
        let path = ConfigPaths::main_config()?;

        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_with_imports(&path)
    }

    /// Loads a configuration file with support for importing other TOML files
    ///
    /// Imports are listed as `imports = ["@gateways", "@common/mapper"]`,
    /// resolved relative to the importing file, with `.toml` appended when
    /// no extension is given. Imported configurations are merged first and
    /// the importing file takes precedence in case of conflicts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read
    /// - The TOML content is invalid
    /// - Any imported files cannot be loaded
    /// - Circular imports are detected
    /// - The merged configuration is invalid
    #[instrument]
    pub fn load_with_imports(path: &Path) -> Result<Config, ConfigError> {
        let canonical_path = path.canonicalize().map_err(|e| ConfigError::io(e, path))?;

        let mut chain = Vec::new();
        let merged = Self::load_value(&canonical_path, &mut chain)?;

        merged.try_into().map_err(|e| ConfigError::Validation {
            details: e.to_string(),
        })
    }

    fn load_value(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Value, ConfigError> {
        if chain.iter().any(|seen| seen == path) {
            let chain = chain
                .iter()
                .chain([&path.to_path_buf()])
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ConfigError::CircularImport { chain });
        }

        chain.push(path.to_path_buf());
        let result = Self::load_file(path, chain);
        chain.pop();

        result
    }

    fn load_file(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Value, ConfigError> {
        let content = if chain.len() == 1 {
            fs::read_to_string(path).map_err(|e| ConfigError::io(e, path))?
        } else {
            fs::read_to_string(path).map_err(|e| ConfigError::import(e, path))?
        };

        let value: Value =
            toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))?;

        let mut imported = Vec::new();
        for import_path in Self::extract_import_paths(&value) {
            let resolved = Self::resolve_import_path(path, &import_path)?;
            let canonical = resolved
                .canonicalize()
                .map_err(|e| ConfigError::import(e, &resolved))?;

            debug!(import = %canonical.display(), "Loading config import");
            imported.push(Self::load_value(&canonical, chain)?);
        }

        Ok(merge_toml_configs(imported, value))
    }

    fn extract_import_paths(value: &Value) -> Vec<String> {
        match value.get("imports") {
            Some(Value::Array(imports)) => imports
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| s.strip_prefix('@'))
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf, ConfigError> {
        let parent_dir = base_path.parent().ok_or_else(|| ConfigError::Import {
            path: base_path.to_path_buf(),
            details: "Invalid base path - no parent directory".to_string(),
        })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}

/// Merges imported configs with the main configuration taking precedence
fn merge_toml_configs(imports: Vec<Value>, main: Value) -> Value {
    let mut accumulated = Value::Table(Map::new());

    for import in imports {
        accumulated = merge_two_toml_configs(accumulated, import);
    }

    merge_two_toml_configs(accumulated, main)
}

/// Deep merges two TOML values. Tables merge key by key; for anything
/// else the overlay replaces the base.
fn merge_two_toml_configs(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            let mut merged_table = overlay_table;

            for (key, base_value) in base_table {
                match merged_table.remove(&key) {
                    None => {
                        merged_table.insert(key, base_value);
                    }
                    Some(overlay_value) => {
                        let merged_value = merge_two_toml_configs(base_value, overlay_value);
                        merged_table.insert(key, merged_value);
                    }
                }
            }

            Value::Table(merged_table)
        }
        (_, overlay) => overlay,
    }
}
