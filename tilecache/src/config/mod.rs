//! Configuration file handling for `~/.tilecache/config.ini`.
//!
//! Missing files and missing keys fall back to the defaults in
//! [`defaults`]; unknown keys are ignored.
//!
//! # Example
//!
//! ```
//! use tilecache::config::{ConfigFile, DEFAULT_PROVIDER};
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.provider.default, DEFAULT_PROVIDER);
//! assert_eq!(config.cache.dir_mode, 0o700);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod size;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CacheSettings, ConfigFile, DownloadSettings, ProviderSettings};
pub use size::format_size;
