//! Layered configuration aggregation for confpack extensions.
//!
//! Installable packages of type `confpack-extension` contribute configuration
//! to a host application, either through a registered [`ConfigProvider`]
//! capability or through files in a `config/` directory under their install
//! path. At install time the [`builder::RegistryBuilder`] collects the
//! declared metadata of every such package, resolves their relative
//! before/after ordering constraints into one deterministic sequence, and
//! renders the result into a [`snapshot`] artifact. At runtime the
//! [`compositor::ExtensionConfigSource`] walks the cached registry and folds
//! every extension's contribution into a single configuration tree, later
//! (higher-priority) extensions overriding earlier ones key by key.

pub mod builder;
pub mod compositor;
pub mod dir;
pub mod error;
pub mod extension;
pub mod factory;
pub mod manager;
pub mod merge;
pub mod ordering;
pub mod package_config;
pub mod provider;
pub mod reader;
pub mod snapshot;

/// The package type recognized by the registry builder.
///
/// Packages of any other type are ignored during registry construction.
pub const PACKAGE_TYPE: &str = "confpack-extension";

/// The directory under an extension's install path that is scanned for
/// configuration files.
pub const CONFIG_DIR: &str = "config";

pub use builder::{DiscoveredPackage, RegistryBuilder};
pub use compositor::ExtensionConfigSource;
pub use dir::DirReader;
pub use error::{Error, Result};
pub use extension::Extension;
pub use factory::ReaderFactory;
pub use manager::{ExtensionManager, ExtensionRegistry, RegistrySource};
pub use merge::{merge_into, merged};
pub use ordering::DependencyOrderer;
pub use package_config::{PackageConfig, RootConfig};
pub use provider::{ConfigProvider, ProviderRegistry};
pub use reader::{ConfigMap, ConfigReader};
pub use snapshot::{SnapshotSource, render_snapshot};
