//! Accessors over the loosely-typed metadata bags of packages and the root.
//!
//! Both package manifests and the build root carry a free-form `extra`
//! mapping. The accessors here pull the confpack-specific sections out of
//! those bags, apply defaults, and memoize the normalized result so the bag
//! is only walked once per instance. Extraction is deliberately tolerant:
//! missing or wrong-typed entries fall back to their defaults and unknown
//! keys are ignored.

use std::cell::OnceCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::reader::ConfigMap;

/// The namespaced key a package declares its extension settings under.
pub const EXTENSION_EXTRA_KEY: &str = "confpack/extension";

/// The namespaced key the build root declares per-extension settings under.
pub const ROOT_EXTRA_KEY: &str = "confpack/extensions";

fn string_entry(bag: &ConfigMap, key: &str) -> Option<String> {
    bag.get(key)?.as_str().map(str::to_owned)
}

fn name_list(bag: &ConfigMap, key: &str) -> Vec<String> {
    bag.get(key)
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Normalized extension settings declared by one package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionDeclaration {
    pub provider: String,
    pub force_config_dir: bool,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Accessor over a single package's metadata bag.
pub struct PackageConfig {
    extra: Value,
    parsed: OnceCell<ExtensionDeclaration>,
}

impl PackageConfig {
    pub fn new(extra: Value) -> Self {
        Self {
            extra,
            parsed: OnceCell::new(),
        }
    }

    /// Provider key declared under `provider` (or the legacy `class` key).
    /// Empty string when the package declares none.
    pub fn provider(&self) -> &str {
        &self.declaration().provider
    }

    /// Whether the `config/` directory must be read even with a provider.
    pub fn force_config_dir(&self) -> bool {
        self.declaration().force_config_dir
    }

    /// Extension names this package wants to be ordered before.
    pub fn before(&self) -> &[String] {
        &self.declaration().before
    }

    /// Extension names this package wants to be ordered after.
    pub fn after(&self) -> &[String] {
        &self.declaration().after
    }

    fn declaration(&self) -> &ExtensionDeclaration {
        self.parsed.get_or_init(|| {
            let mut declaration = ExtensionDeclaration::default();
            let Some(Value::Object(bag)) = self.extra.get(EXTENSION_EXTRA_KEY) else {
                return declaration;
            };
            if let Some(provider) =
                string_entry(bag, "provider").or_else(|| string_entry(bag, "class"))
            {
                declaration.provider = provider;
            }
            if let Some(force) = bag.get("force-config-dir").and_then(Value::as_bool) {
                declaration.force_config_dir = force;
            }
            declaration.before = name_list(bag, "before");
            declaration.after = name_list(bag, "after");
            declaration
        })
    }
}

/// Per-extension settings declared by the build root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootEntry {
    pub options: ConfigMap,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Accessor over the build root's metadata bag.
///
/// Lookups by extension name never fail; unknown names yield the defaults.
pub struct RootConfig {
    extra: Value,
    parsed: OnceCell<HashMap<String, RootEntry>>,
}

impl RootConfig {
    pub fn new(extra: Value) -> Self {
        Self {
            extra,
            parsed: OnceCell::new(),
        }
    }

    /// Provider options the root assigns to the named extension.
    pub fn options_for(&self, name: &str) -> ConfigMap {
        self.entries()
            .get(name)
            .map(|entry| entry.options.clone())
            .unwrap_or_default()
    }

    /// Before-constraints the root adds to the named extension.
    pub fn before_for(&self, name: &str) -> Vec<String> {
        self.entries()
            .get(name)
            .map(|entry| entry.before.clone())
            .unwrap_or_default()
    }

    /// After-constraints the root adds to the named extension.
    pub fn after_for(&self, name: &str) -> Vec<String> {
        self.entries()
            .get(name)
            .map(|entry| entry.after.clone())
            .unwrap_or_default()
    }

    fn entries(&self) -> &HashMap<String, RootEntry> {
        self.parsed.get_or_init(|| {
            let mut entries = HashMap::new();
            let Some(extensions) = self
                .extra
                .get(ROOT_EXTRA_KEY)
                .and_then(|section| section.get("extensions"))
                .and_then(Value::as_object)
            else {
                return entries;
            };
            for (name, value) in extensions {
                let Some(bag) = value.as_object() else {
                    continue;
                };
                entries.insert(
                    name.clone(),
                    RootEntry {
                        options: bag
                            .get("options")
                            .and_then(Value::as_object)
                            .cloned()
                            .unwrap_or_default(),
                        before: name_list(bag, "before"),
                        after: name_list(bag, "after"),
                    },
                );
            }
            entries
        })
    }
}
