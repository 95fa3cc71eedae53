//! Reading and writing `config.ini` on disk.

use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

/// Name of the directory under `$HOME` holding tilecache's own files.
const CONFIG_DIR_NAME: &str = ".tilecache";

/// Errors from loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but is not valid INI.
    #[error("cannot parse config file: {0}")]
    Parse(#[from] ini::Error),

    /// A key holds a value of the wrong shape.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The directory for the file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// The file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// `~/.tilecache`, or `./.tilecache` when there is no home directory.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// `~/.tilecache/config.ini`.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

impl ConfigFile {
    /// Reads [`config_file_path`]; see [`ConfigFile::load_from`].
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Reads `path`, falling back to defaults for a missing file or key.
    ///
    /// Backslashes are taken literally so Windows paths survive a
    /// save/load cycle.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file_noescape(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Writes to [`config_file_path`].
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Writes the commented INI form to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigFileError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, super::writer::to_config_string(self)).map_err(|source| {
            ConfigFileError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Writes defaults to [`config_file_path`] unless a file is already there.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }
}
