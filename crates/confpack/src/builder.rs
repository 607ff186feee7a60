//! Builds the ordered extension registry from discovered packages.
//!
//! Package discovery itself is a collaborator: it hands over one
//! [`DiscoveredPackage`] per installed package, each carrying its declared
//! metadata bag. The builder keeps the packages of the recognized type,
//! combines package-declared and root-declared ordering constraints
//! additively, resolves them into one sequence, and produces the registry.

use std::path::PathBuf;

use serde_json::Value;

use crate::PACKAGE_TYPE;
use crate::extension::Extension;
use crate::manager::ExtensionRegistry;
use crate::ordering::DependencyOrderer;
use crate::package_config::{PackageConfig, RootConfig};

/// One installed package as reported by package discovery.
#[derive(Debug, Clone)]
pub struct DiscoveredPackage {
    /// Unique package name.
    pub name: String,
    /// Declared package type; only [`PACKAGE_TYPE`] packages become
    /// extensions.
    pub package_type: String,
    /// Install location. An empty path means the package is the build root
    /// itself.
    pub install_path: PathBuf,
    /// The package's free-form metadata bag.
    pub extra: Value,
}

/// Assembles the ordered [`ExtensionRegistry`] for one build.
pub struct RegistryBuilder {
    base_path: PathBuf,
}

impl RegistryBuilder {
    /// `base_path` is the build root, used as the install path of packages
    /// that report none.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Build the registry from the root metadata bag and the discovered
    /// package set.
    ///
    /// Input order of `packages` is the tie-break order for unconstrained
    /// extensions, so discovery must hand packages over deterministically.
    pub fn build(&self, root_extra: Value, packages: Vec<DiscoveredPackage>) -> ExtensionRegistry {
        let root = RootConfig::new(root_extra);

        let mut draft: Vec<Extension> = Vec::new();
        for package in packages {
            if package.package_type != PACKAGE_TYPE {
                continue;
            }

            let config = PackageConfig::new(package.extra);
            let install_path = if package.install_path.as_os_str().is_empty() {
                self.base_path.clone()
            } else {
                package.install_path
            };

            // Package-declared and root-declared constraints are combined,
            // not replaced
            let mut before = config.before().to_vec();
            before.extend(root.before_for(&package.name));
            let mut after = config.after().to_vec();
            after.extend(root.after_for(&package.name));

            draft.push(Extension {
                provider: config.provider().to_string(),
                force_config_dir: config.force_config_dir(),
                options: root.options_for(&package.name),
                name: package.name,
                install_path,
                before,
                after,
            });
        }

        let mut orderer = DependencyOrderer::new();
        for extension in &draft {
            orderer.add_constraints(&extension.name, &extension.before, &extension.after);
        }
        let order = orderer.sort();

        let mut by_name: std::collections::HashMap<String, Extension> = draft
            .into_iter()
            .map(|extension| (extension.name.clone(), extension))
            .collect();
        let ordered = order
            .into_iter()
            .filter_map(|name| by_name.remove(&name))
            .collect();

        ExtensionRegistry::from_ordered(ordered)
    }
}
