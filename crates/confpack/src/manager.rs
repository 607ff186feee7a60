//! The ordered extension registry and its memoizing manager.

use std::cell::OnceCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::extension::Extension;

/// The ordered, immutable set of installed extensions.
///
/// Preserves the sequence produced by the dependency orderer and supports
/// lookup by name.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    items: Vec<Extension>,
    index: HashMap<String, usize>,
}

impl ExtensionRegistry {
    /// Build a registry from an already-ordered extension list.
    ///
    /// A duplicate name replaces the earlier entry's lookup slot but keeps
    /// the sequence intact; builders are expected to deduplicate upstream.
    pub fn from_ordered(items: Vec<Extension>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(position, ext)| (ext.name.clone(), position))
            .collect();
        Self { items, index }
    }

    /// Extensions in priority order (lowest priority last).
    pub fn iter(&self) -> std::slice::Iter<'_, Extension> {
        self.items.iter()
    }

    /// Look up an extension by name.
    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.index.get(name).map(|&position| &self.items[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Extension names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|ext| ext.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExtensionRegistry {
    type Item = &'a Extension;
    type IntoIter = std::slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Produces the extension registry for a manager.
///
/// Implemented by the snapshot loader; tests and embedders can implement it
/// over an in-memory registry.
pub trait RegistrySource {
    fn load(&self) -> Result<ExtensionRegistry>;
}

/// An already-built registry is its own source.
impl RegistrySource for ExtensionRegistry {
    fn load(&self) -> Result<ExtensionRegistry> {
        Ok(self.clone())
    }
}

/// Long-lived owner of the registry snapshot.
///
/// Loads the registry from its source at most once; every later access
/// returns the same snapshot. A failed load is not cached, so callers can
/// retry after fixing the source data.
pub struct ExtensionManager {
    source: Box<dyn RegistrySource>,
    cache: OnceCell<ExtensionRegistry>,
}

impl ExtensionManager {
    pub fn new(source: Box<dyn RegistrySource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    /// The registry snapshot, loading it on first access.
    pub fn extensions(&self) -> Result<&ExtensionRegistry> {
        if let Some(registry) = self.cache.get() {
            return Ok(registry);
        }
        let registry = self.source.load()?;
        Ok(self.cache.get_or_init(|| registry))
    }

    /// Look up a single extension by name.
    pub fn get(&self, name: &str) -> Result<&Extension> {
        self.extensions()?
            .get(name)
            .ok_or_else(|| Error::UnknownExtension(name.to_string()))
    }
}
