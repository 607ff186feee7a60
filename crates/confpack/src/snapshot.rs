//! Source-embeddable snapshot of the built registry.
//!
//! The registry is resolved at install time but consumed at every runtime
//! config read, so it is rendered into a deterministic JSON artifact that a
//! host can write next to its sources (and embed via `include_str!`).
//! Install paths are stored relative to an anchor directory where possible,
//! keeping the artifact stable across checkouts; [`SnapshotSource`]
//! re-anchors them when the snapshot is loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::manager::{ExtensionRegistry, RegistrySource};
use crate::reader::ConfigMap;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    name: String,
    install_path: String,
    #[serde(default)]
    provider: String,
    #[serde(default)]
    force_config_dir: bool,
    #[serde(default)]
    options: ConfigMap,
    #[serde(default)]
    before: Vec<String>,
    #[serde(default)]
    after: Vec<String>,
}

/// Render the registry into its snapshot form.
///
/// The output is deterministic for a given registry and anchor: entries
/// appear in registry order and paths under the anchor are stored relative
/// to it. Regenerated from scratch on every registry rebuild.
pub fn render_snapshot(registry: &ExtensionRegistry, anchor: &Path) -> Result<String> {
    let entries: Vec<SnapshotEntry> = registry
        .iter()
        .map(|extension| SnapshotEntry {
            name: extension.name.clone(),
            install_path: relative_to(&extension.install_path, anchor),
            provider: extension.provider.clone(),
            force_config_dir: extension.force_config_dir,
            options: extension.options.clone(),
            before: extension.before.clone(),
            after: extension.after.clone(),
        })
        .collect();

    serde_json::to_string_pretty(&entries).map_err(|e| Error::Snapshot {
        reason: e.to_string(),
    })
}

fn relative_to(path: &Path, anchor: &Path) -> String {
    match path.strip_prefix(anchor) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            relative.to_string_lossy().into_owned()
        }
        Ok(_) => ".".to_string(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Loads a registry from a rendered snapshot.
pub struct SnapshotSource {
    json: String,
    anchor: PathBuf,
}

impl SnapshotSource {
    /// `json` is the rendered snapshot; `anchor` is the directory relative
    /// install paths are resolved against.
    pub fn new(json: impl Into<String>, anchor: impl Into<PathBuf>) -> Self {
        Self {
            json: json.into(),
            anchor: anchor.into(),
        }
    }
}

impl RegistrySource for SnapshotSource {
    fn load(&self) -> Result<ExtensionRegistry> {
        let entries: Vec<SnapshotEntry> =
            serde_json::from_str(&self.json).map_err(|e| Error::Snapshot {
                reason: e.to_string(),
            })?;

        let extensions = entries
            .into_iter()
            .map(|entry| {
                let path = PathBuf::from(&entry.install_path);
                let install_path = if path.is_absolute() {
                    path
                } else if entry.install_path == "." {
                    self.anchor.clone()
                } else {
                    self.anchor.join(path)
                };
                Extension {
                    name: entry.name,
                    install_path,
                    provider: entry.provider,
                    force_config_dir: entry.force_config_dir,
                    options: entry.options,
                    before: entry.before,
                    after: entry.after,
                }
            })
            .collect();

        Ok(ExtensionRegistry::from_ordered(extensions))
    }
}
