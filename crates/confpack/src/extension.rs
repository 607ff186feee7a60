//! The extension value entity.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reader::ConfigMap;

/// One installed extension as recorded in the registry.
///
/// Constructed once when the registry is built and never mutated afterwards;
/// rebuilding the registry replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    /// Unique package name, typically `vendor/package`.
    pub name: String,
    /// Where the extension's files live on disk.
    pub install_path: PathBuf,
    /// Key of the registered configuration provider; empty means none.
    #[serde(default)]
    pub provider: String,
    /// Consult the `config/` directory even when a provider is present.
    #[serde(default)]
    pub force_config_dir: bool,
    /// Options passed to the provider, supplied by the root configuration.
    #[serde(default)]
    pub options: ConfigMap,
    /// Names of extensions this one must be ordered before.
    #[serde(default)]
    pub before: Vec<String>,
    /// Names of extensions this one must be ordered after.
    #[serde(default)]
    pub after: Vec<String>,
}

impl Extension {
    /// Create an extension with no provider, options, or constraints.
    pub fn new(name: impl Into<String>, install_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            install_path: install_path.into(),
            provider: String::new(),
            force_config_dir: false,
            options: ConfigMap::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Whether the extension references a configuration provider.
    pub fn has_provider(&self) -> bool {
        !self.provider.is_empty()
    }
}
