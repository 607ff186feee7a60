//! Directory-based configuration source.
//!
//! Reads every recognized configuration file found directly in one
//! directory (non-recursive) and merges them into a single mapping. Files
//! are processed in ascending file-name order so the result is stable no
//! matter what order the filesystem lists them in.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::factory::ReaderFactory;
use crate::merge::merge_into;
use crate::reader::{ConfigMap, ConfigReader};

/// Reads and merges all recognized configuration files in one directory.
pub struct DirReader<'a> {
    dir: PathBuf,
    factory: &'a ReaderFactory,
}

impl<'a> DirReader<'a> {
    pub fn new(dir: impl Into<PathBuf>, factory: &'a ReaderFactory) -> Self {
        Self {
            dir: dir.into(),
            factory,
        }
    }

    /// Recognized files directly under the directory, sorted by file name.
    ///
    /// A missing directory yields an empty list, not an error.
    fn config_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if self.factory.recognizes(&path) {
                files.push(path);
            } else {
                tracing::debug!(path = %path.display(), "skipping unrecognized file in config directory");
            }
        }
        files.sort_by_key(|path| path.file_name().map(std::ffi::OsStr::to_os_string));
        Ok(files)
    }

    fn read_one(&self, path: &Path) -> Result<ConfigMap> {
        // `config_files` only returns recognized paths, so a reader exists
        let reader = self
            .factory
            .reader_for(path)
            .ok_or_else(|| Error::InvalidConfigFile {
                path: path.to_path_buf(),
                reason: "no reader registered for this file type".to_string(),
            })?;
        reader.read_config()
    }
}

impl ConfigReader for DirReader<'_> {
    fn has_config(&self) -> bool {
        self.config_files()
            .map(|files| !files.is_empty())
            .unwrap_or(false)
    }

    fn read_config(&self) -> Result<ConfigMap> {
        let mut config = ConfigMap::new();
        for path in self.config_files()? {
            merge_into(&mut config, self.read_one(&path)?);
        }
        Ok(config)
    }
}
