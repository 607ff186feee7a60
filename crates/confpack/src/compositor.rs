//! The compositor: folds every extension's configuration into one tree.
//!
//! Extensions are walked in reverse registry order, so the lowest-priority
//! extension is applied first and each later extension overrides it key by
//! key. Within one extension the provider output takes precedence over the
//! `config/` directory output. Any failure aborts the whole read; partial
//! results are never returned.

use crate::CONFIG_DIR;
use crate::dir::DirReader;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::factory::ReaderFactory;
use crate::manager::ExtensionManager;
use crate::merge::merge_into;
use crate::provider::ProviderRegistry;
use crate::reader::{ConfigMap, ConfigReader};

/// Configuration source over the installed extension set.
pub struct ExtensionConfigSource<'a> {
    manager: &'a ExtensionManager,
    providers: &'a ProviderRegistry,
    readers: &'a ReaderFactory,
}

impl<'a> ExtensionConfigSource<'a> {
    pub fn new(
        manager: &'a ExtensionManager,
        providers: &'a ProviderRegistry,
        readers: &'a ReaderFactory,
    ) -> Self {
        Self {
            manager,
            providers,
            readers,
        }
    }

    /// The `config/` directory contribution of one extension.
    ///
    /// Skipped entirely when the extension has a provider and does not set
    /// `force_config_dir`. A missing or empty directory contributes
    /// nothing; an unreadable file is fatal and reported with the owning
    /// extension's name.
    fn read_config_dir(&self, extension: &Extension) -> Result<ConfigMap> {
        if extension.has_provider() && !extension.force_config_dir {
            return Ok(ConfigMap::new());
        }

        let reader = DirReader::new(extension.install_path.join(CONFIG_DIR), self.readers);
        if !reader.has_config() {
            return Ok(ConfigMap::new());
        }

        reader.read_config().map_err(|source| Error::ConfigDir {
            extension: extension.name.clone(),
            source: Box::new(source),
        })
    }

    /// The provider contribution of one extension.
    ///
    /// An unresolvable provider key is fatal, not a skip.
    fn read_provider(&self, extension: &Extension) -> Result<ConfigMap> {
        if !extension.has_provider() {
            return Ok(ConfigMap::new());
        }

        let provider =
            self.providers
                .resolve(&extension.provider)
                .ok_or_else(|| Error::UnknownProvider {
                    provider: extension.provider.clone(),
                    extension: extension.name.clone(),
                })?;

        if !provider.has_config(&extension.options) {
            return Ok(ConfigMap::new());
        }

        provider.get_config(&extension.options)
    }
}

impl ConfigReader for ExtensionConfigSource<'_> {
    fn has_config(&self) -> bool {
        self.manager
            .extensions()
            .map(|registry| !registry.is_empty())
            .unwrap_or(false)
    }

    fn read_config(&self) -> Result<ConfigMap> {
        let mut final_config = ConfigMap::new();

        for extension in self.manager.extensions()?.iter().rev() {
            merge_into(&mut final_config, self.read_config_dir(extension)?);
            merge_into(&mut final_config, self.read_provider(extension)?);
        }

        Ok(final_config)
    }
}
