//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use tilecache::config::ConfigFileError;
use tilecache::coord::KeyError;
use tilecache::fetcher::FetchError;
use tilecache::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded or saved
    Config(ConfigFileError),
    /// Provider name not in the catalog
    UnknownProvider(String),
    /// Invalid tile coordinates or range
    InvalidTile(String),
    /// Failed to create the HTTP client
    HttpClient(ProviderError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to fetch a tile
    Fetch(FetchError),
    /// Some tiles of a prefetch failed
    Prefetch { failed: usize, requested: usize },
    /// Failed to write output
    FileWrite { path: String, error: std::io::Error },
    /// Failed to read cache statistics
    CacheStats(std::io::Error),
    /// Failed to clear the cache
    CacheClear(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::UnknownProvider(_) => {
                eprintln!();
                eprintln!("Run `tilecache providers` to list the available providers.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check {} or run `tilecache init --force` to rewrite it.",
                    tilecache::config::config_file_path().display()
                );
            }
            CliError::Fetch(FetchError::Download { .. }) | CliError::Prefetch { .. } => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection or the tile server is down");
                eprintln!("  2. The tile server rejected the User-Agent (see [download] user_agent)");
                eprintln!("  3. The zoom level is beyond what the provider serves");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::UnknownProvider(name) => write!(f, "Unknown provider '{}'", name),
            CliError::InvalidTile(msg) => write!(f, "Invalid tile: {}", msg),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch tile: {}", e),
            CliError::Prefetch { failed, requested } => {
                write!(f, "{} of {} tiles failed", failed, requested)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::CacheStats(e) => write!(f, "Failed to read cache statistics: {}", e),
            CliError::CacheClear(e) => write!(f, "Failed to clear cache: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::CacheStats(e) => Some(e),
            CliError::CacheClear(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<KeyError> for CliError {
    fn from(e: KeyError) -> Self {
        CliError::InvalidTile(e.to_string())
    }
}
