//! The `ConfigReader` trait and the built-in format-file readers.
//!
//! Every configuration source in the crate speaks the same two-method
//! contract: a cheap existence probe and a full read producing a mapping.
//! The file readers here are thin path-to-mapping adapters; each parses one
//! format and normalizes the result into a JSON object so the same merge
//! works regardless of the on-disk format.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// A top-level configuration mapping.
pub type ConfigMap = serde_json::Map<String, Value>;

/// A source of configuration data.
pub trait ConfigReader {
    /// Whether this source has any configuration at all. Must be cheap and
    /// must not perform a full read.
    fn has_config(&self) -> bool;

    /// Produce the full configuration mapping of this source.
    fn read_config(&self) -> Result<ConfigMap>;
}

/// Normalize a parsed document into a `ConfigMap`.
///
/// A null document (e.g. an empty YAML file) counts as an empty mapping;
/// any other non-object top level is rejected.
fn into_map(value: Value, path: &Path) -> Result<ConfigMap> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        _ => Err(Error::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a single YAML file into a configuration mapping.
#[derive(Debug, Clone)]
pub struct YamlFileReader {
    path: PathBuf,
}

impl YamlFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigReader for YamlFileReader {
    fn has_config(&self) -> bool {
        self.path.is_file()
    }

    fn read_config(&self) -> Result<ConfigMap> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigMap::new());
        }
        let value: Value =
            serde_yaml::from_str(&content).map_err(|e| Error::InvalidConfigFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        into_map(value, &self.path)
    }
}

/// Reads a single TOML file into a configuration mapping.
#[derive(Debug, Clone)]
pub struct TomlFileReader {
    path: PathBuf,
}

impl TomlFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigReader for TomlFileReader {
    fn has_config(&self) -> bool {
        self.path.is_file()
    }

    fn read_config(&self) -> Result<ConfigMap> {
        let content = read_file(&self.path)?;
        let table: toml::Value =
            toml::from_str(&content).map_err(|e| Error::InvalidConfigFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        let value = serde_json::to_value(table).map_err(|e| Error::InvalidConfigFile {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        into_map(value, &self.path)
    }
}

/// Reads a single JSON file into a configuration mapping.
#[derive(Debug, Clone)]
pub struct JsonFileReader {
    path: PathBuf,
}

impl JsonFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigReader for JsonFileReader {
    fn has_config(&self) -> bool {
        self.path.is_file()
    }

    fn read_config(&self) -> Result<ConfigMap> {
        let content = read_file(&self.path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| Error::InvalidConfigFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        into_map(value, &self.path)
    }
}
