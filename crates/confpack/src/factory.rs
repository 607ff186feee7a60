//! Format-reader registry keyed by file extension.
//!
//! The directory reader asks this factory for a reader per file; which
//! formats are recognized is therefore a configuration of the factory, not
//! of the directory scan. Hosts can register additional formats (or
//! override a built-in one) before handing the factory to the compositor.

use std::collections::HashMap;
use std::path::Path;

use crate::reader::{ConfigReader, JsonFileReader, TomlFileReader, YamlFileReader};

type ReaderFn = Box<dyn Fn(&Path) -> Box<dyn ConfigReader>>;

/// Creates file readers based on file extension.
pub struct ReaderFactory {
    readers: HashMap<String, ReaderFn>,
}

impl ReaderFactory {
    /// Create a factory with the built-in formats registered:
    /// `yaml`/`yml`, `toml`, and `json`.
    pub fn new() -> Self {
        let mut factory = Self {
            readers: HashMap::new(),
        };
        factory.register("yaml", |path| Box::new(YamlFileReader::new(path)));
        factory.register("yml", |path| Box::new(YamlFileReader::new(path)));
        factory.register("toml", |path| Box::new(TomlFileReader::new(path)));
        factory.register("json", |path| Box::new(JsonFileReader::new(path)));
        factory
    }

    /// Register a reader for a file extension, replacing any existing one.
    ///
    /// The extension is matched case-insensitively and without the dot.
    pub fn register<F>(&mut self, extension: &str, reader: F)
    where
        F: Fn(&Path) -> Box<dyn ConfigReader> + 'static,
    {
        self.readers
            .insert(extension.to_ascii_lowercase(), Box::new(reader));
    }

    /// Whether a file with this path would be picked up by the factory.
    pub fn recognizes(&self, path: &Path) -> bool {
        self.extension_of(path)
            .is_some_and(|ext| self.readers.contains_key(&ext))
    }

    /// Create a reader for the given path, or `None` if the file extension
    /// is not registered.
    pub fn reader_for(&self, path: &Path) -> Option<Box<dyn ConfigReader>> {
        let ext = self.extension_of(path)?;
        self.readers.get(&ext).map(|make| make(path))
    }

    /// Registered extensions, sorted.
    pub fn known_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.readers.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    fn extension_of(&self, path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

impl Default for ReaderFactory {
    fn default() -> Self {
        Self::new()
    }
}
