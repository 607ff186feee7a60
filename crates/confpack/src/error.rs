use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading extension configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reading a configuration file or directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration file {path}: {reason}")]
    InvalidConfigFile { path: PathBuf, reason: String },

    /// A configuration file parsed, but its top level is not a mapping.
    #[error("configuration file {path} does not contain a mapping at the top level")]
    NotAMapping { path: PathBuf },

    /// Extension not found in the registry.
    #[error("extension \"{0}\" not found")]
    UnknownExtension(String),

    /// An extension references a provider that is not registered.
    #[error("provider \"{provider}\" is not registered (extension \"{extension}\")")]
    UnknownProvider { provider: String, extension: String },

    /// A provider failed to produce configuration.
    #[error("provider \"{provider}\" failed for extension \"{extension}\": {reason}")]
    ProviderConfig {
        provider: String,
        extension: String,
        reason: String,
    },

    /// The config directory of an extension yielded invalid content.
    #[error("invalid configuration directory for extension \"{extension}\"")]
    ConfigDir {
        extension: String,
        #[source]
        source: Box<Error>,
    },

    /// A registry snapshot could not be rendered or parsed.
    #[error("invalid registry snapshot: {reason}")]
    Snapshot { reason: String },
}
