//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and fetcher creation
//! to reduce duplication across command handlers.

use std::path::{Path, PathBuf};

use tracing::info;

use tilecache::config::{config_file_path, ConfigFile};
use tilecache::fetcher::TileFetcher;
use tilecache::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use tilecache::provider::{lookup, AsyncReqwestClient, TileProvider};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to use instead of ~/.tilecache/config.ini
    /// * `verbose` - Log at debug level unless RUST_LOG says otherwise
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let level = if verbose { "debug" } else { "info" };
        let logging_guard = init_logging(&default_log_dir(), default_log_file(), level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tilecache v{}", tilecache::VERSION);
        info!(
            config = %self.config_path.display(),
            "tilecache CLI: {} command",
            command
        );
    }

    /// Resolve a provider from the CLI argument or the configured default.
    pub fn resolve_provider(&self, name: Option<&str>) -> Result<TileProvider, CliError> {
        let name = name.unwrap_or(self.config.provider.default.as_str());
        lookup(name).ok_or_else(|| CliError::UnknownProvider(name.to_string()))
    }

    /// Create a fetcher for `provider` from the download and cache settings.
    pub fn create_fetcher(
        &self,
        provider: TileProvider,
        use_cache: bool,
    ) -> Result<TileFetcher<AsyncReqwestClient>, CliError> {
        let download = &self.config.download;
        let client = download.http_client().map_err(CliError::HttpClient)?;

        let mut fetcher = TileFetcher::new(provider, client)
            .with_retry_policy(download.retry_policy())
            .with_parallelism(download.parallel);

        if use_cache {
            if let Some(cache) = self.config.cache.tile_cache() {
                fetcher = fetcher.with_cache(cache);
            }
        }

        Ok(fetcher)
    }

    /// Run a future to completion on a fresh multi-threaded runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> Result<F::Output, CliError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;
        Ok(runtime.block_on(future))
    }
}
