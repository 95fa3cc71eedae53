//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file, plus
//! helpers that turn the settings into runtime components.

use std::path::PathBuf;

use crate::cache::{TileCache, WriteMode};
use crate::fetcher::RetryPolicy;
use crate::provider::{AsyncReqwestClient, ProviderError};

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Cache settings
    pub cache: CacheSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Provider settings
    pub provider: ProviderSettings,
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Cache root directory
    pub directory: PathBuf,
    /// Permission bits for directories the cache creates
    pub dir_mode: u32,
    /// Overwrite or exclusive stores
    pub write_mode: WriteMode,
    /// When false, tiles are always downloaded and never stored
    pub enabled: bool,
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Request timeout in seconds
    pub timeout: u64,
    /// Attempts per tile, including the first
    pub max_attempts: u32,
    /// Concurrent tile fetches in a batch
    pub parallel: usize,
    /// User-Agent header
    pub user_agent: String,
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Catalog name of the provider used by default
    pub default: String,
}

impl CacheSettings {
    /// Builds the tile cache, or `None` when caching is disabled.
    pub fn tile_cache(&self) -> Option<TileCache> {
        self.enabled.then(|| {
            TileCache::new(self.directory.clone(), self.dir_mode).with_write_mode(self.write_mode)
        })
    }
}

impl DownloadSettings {
    /// Retry policy for the configured attempt count.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_max_attempts(self.max_attempts)
    }

    /// HTTP client with the configured timeout and User-Agent.
    pub fn http_client(&self) -> Result<AsyncReqwestClient, ProviderError> {
        AsyncReqwestClient::with_options(self.timeout, &self.user_agent)
    }
}
