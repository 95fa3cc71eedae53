//! Fetch error types.

use thiserror::Error;

use crate::coord::TileKey;
use crate::provider::ProviderError;

/// Errors returned by [`TileFetcher`](super::TileFetcher).
///
/// Cache failures are not fetch errors: a failed load falls back to the
/// network and a failed store is logged, the downloaded tile is still
/// returned.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The key names a different provider than the fetcher serves.
    #[error("tile {key} requested from fetcher for provider '{provider}'")]
    ProviderMismatch { key: TileKey, provider: String },

    /// Download failed after exhausting the retry policy.
    #[error("failed to download tile {key} after {attempts} attempt(s): {source}")]
    Download {
        key: TileKey,
        attempts: u32,
        source: ProviderError,
    },

    /// A blocking cache task panicked or was cancelled.
    #[error("cache task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_display() {
        let err = FetchError::Download {
            key: TileKey::new("osm", 3, 1, 2).unwrap(),
            attempts: 3,
            source: ProviderError::HttpError("timeout".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("osm/3/1/2"));
        assert!(msg.contains("3 attempt(s)"));
        assert!(msg.contains("timeout"));
    }
}
