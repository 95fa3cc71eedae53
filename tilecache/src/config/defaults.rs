//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::cache::{WriteMode, DEFAULT_DIR_MODE};
use crate::fetcher::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PARALLEL_FETCHES};
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Provider used when none is given on the command line.
pub const DEFAULT_PROVIDER: &str = "osm";

/// Default download timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;

/// Default attempts per tile, including the first one.
pub const DEFAULT_DOWNLOAD_MAX_ATTEMPTS: u32 = DEFAULT_MAX_ATTEMPTS;

/// Default number of concurrent tile fetches in a batch.
pub const DEFAULT_DOWNLOAD_PARALLEL: usize = DEFAULT_PARALLEL_FETCHES;

/// Default tile cache directory.
///
/// `~/.cache/tilecache` on Linux, the platform cache directory elsewhere.
pub fn default_cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("tilecache")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                directory: default_cache_directory(),
                dir_mode: DEFAULT_DIR_MODE,
                write_mode: WriteMode::default(),
                enabled: true,
            },
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
                max_attempts: DEFAULT_DOWNLOAD_MAX_ATTEMPTS,
                parallel: DEFAULT_DOWNLOAD_PARALLEL,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            provider: ProviderSettings {
                default: DEFAULT_PROVIDER.to_string(),
            },
        }
    }
}
