//! Configuration providers and their capability registry.
//!
//! An extension may reference a provider by key instead of (or in addition
//! to) shipping config files. Providers are registered up front in a
//! [`ProviderRegistry`]; resolving an unknown key is a fatal configuration
//! error at read time, confined to this single lookup boundary.

use std::collections::HashMap;

use crate::error::Result;
use crate::reader::ConfigMap;

/// A capability that produces configuration programmatically.
pub trait ConfigProvider {
    /// Whether the provider has any configuration for the given options.
    fn has_config(&self, options: &ConfigMap) -> bool;

    /// Produce the configuration mapping for the given options.
    ///
    /// Only called when [`has_config`](Self::has_config) returned true.
    fn get_config(&self, options: &ConfigMap) -> Result<ConfigMap>;
}

type ProviderFactory = Box<dyn Fn() -> Box<dyn ConfigProvider>>;

/// Registry of configuration providers, keyed by provider name.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider factory under a key, replacing any existing one.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn ConfigProvider> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Instantiate the provider registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<Box<dyn ConfigProvider>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered provider keys, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}
