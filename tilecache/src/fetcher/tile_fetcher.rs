//! Cache-first tile fetcher.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::batch::BatchResult;
use super::error::FetchError;
use super::policy::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::cache::{TileCache, TileCacheError};
use crate::coord::{KeyError, TileKey};
use crate::provider::{AsyncHttpClient, ProviderError, TileProvider};

/// Default number of tiles fetched concurrently by `fetch_many`.
pub const DEFAULT_PARALLEL_FETCHES: usize = 8;

/// Where a fetched tile's bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    /// Loaded from the disk cache.
    Cache,
    /// Downloaded from the provider.
    Network,
    /// Provider answered 404 and is configured to ignore it; data is empty.
    Missing,
}

/// Tile bytes plus their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTile {
    /// Raw tile bytes as served by the provider.
    pub data: Vec<u8>,
    /// Where the bytes came from.
    pub source: TileSource,
}

/// Fetches tiles for one provider, consulting the cache first.
pub struct TileFetcher<C: AsyncHttpClient> {
    provider: TileProvider,
    http_client: C,
    cache: Option<TileCache>,
    retry_policy: RetryPolicy,
    parallel: usize,
    /// Per-key locks for fetches currently in progress.
    in_flight: DashMap<TileKey, Arc<Mutex<()>>>,
}

impl<C: AsyncHttpClient> TileFetcher<C> {
    /// Creates a fetcher without a cache.
    ///
    /// Uses exponential backoff with [`DEFAULT_MAX_ATTEMPTS`] attempts and
    /// [`DEFAULT_PARALLEL_FETCHES`] concurrent batch fetches.
    pub fn new(provider: TileProvider, http_client: C) -> Self {
        Self {
            provider,
            http_client,
            cache: None,
            retry_policy: RetryPolicy::exponential(DEFAULT_MAX_ATTEMPTS),
            parallel: DEFAULT_PARALLEL_FETCHES,
            in_flight: DashMap::new(),
        }
    }

    /// Enables the disk cache.
    pub fn with_cache(mut self, cache: TileCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the retry policy for downloads.
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Sets the number of concurrent fetches in `fetch_many` (minimum 1).
    pub fn with_parallelism(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    /// Returns the provider this fetcher serves.
    pub fn provider(&self) -> &TileProvider {
        &self.provider
    }

    /// Returns the cache, if enabled.
    pub fn cache(&self) -> Option<&TileCache> {
        self.cache.as_ref()
    }

    /// Builds a key for this fetcher's provider.
    pub fn key(&self, zoom: u8, x: u32, y: u32) -> Result<TileKey, KeyError> {
        TileKey::new(self.provider.name.clone(), zoom, x, y)
    }

    /// Cache path for `key`, or `None` when caching is disabled.
    pub fn cache_path(&self, key: &TileKey) -> Option<PathBuf> {
        self.cache.as_ref().map(|cache| cache.tile_path(key))
    }

    /// Fetches one tile.
    ///
    /// With a cache: returns the cached entry if present, otherwise
    /// downloads, stores and returns the tile. Empty "missing" tiles are
    /// never stored. Concurrent calls for the same key wait for the first
    /// one and are then served from the cache.
    ///
    /// # Errors
    ///
    /// - [`FetchError::ProviderMismatch`] if `key` names another provider
    /// - [`FetchError::Download`] if the download fails
    pub async fn fetch(&self, key: &TileKey) -> Result<FetchedTile, FetchError> {
        if key.provider() != self.provider.name {
            return Err(FetchError::ProviderMismatch {
                key: key.clone(),
                provider: self.provider.name.clone(),
            });
        }

        let Some(cache) = &self.cache else {
            return self.download(key).await;
        };

        let lock = Arc::clone(&self.in_flight.entry(key.clone()).or_default());
        let guard = lock.lock().await;
        let result = self.fetch_cached(cache, key).await;
        drop(guard);

        // Map entry plus our clone means nobody else is waiting
        self.in_flight
            .remove_if(key, |_, entry| Arc::strong_count(entry) <= 2);

        result
    }

    /// Fetches many tiles with bounded concurrency.
    ///
    /// A failing tile never aborts the batch; every key gets its own result,
    /// in the order the keys were given.
    pub async fn fetch_many(&self, keys: Vec<TileKey>) -> BatchResult {
        let results: Vec<_> = futures::stream::iter(keys)
            .map(|key| async move {
                let result = self.fetch(&key).await;
                if let Err(ref e) = result {
                    warn!(tile = %key, error = %e, "Tile fetch failed");
                }
                (key, result)
            })
            .buffered(self.parallel)
            .collect()
            .await;

        let batch = BatchResult::new(results);
        info!(
            provider = %self.provider.name,
            summary = %batch.summary,
            "Batch fetch complete"
        );
        batch
    }

    async fn fetch_cached(
        &self,
        cache: &TileCache,
        key: &TileKey,
    ) -> Result<FetchedTile, FetchError> {
        let path = cache.tile_path(key);

        let loaded = {
            let cache = cache.clone();
            let path = path.clone();
            tokio::task::spawn_blocking(move || cache.load_path(&path))
                .await
                .map_err(|e| FetchError::Task(e.to_string()))?
        };

        match loaded {
            Ok(Some(data)) => {
                debug!(tile = %key, bytes = data.len(), "Tile cache hit");
                return Ok(FetchedTile {
                    data,
                    source: TileSource::Cache,
                });
            }
            Ok(None) => debug!(tile = %key, "Tile cache miss"),
            Err(e) => warn!(tile = %key, error = %e, "Tile cache read failed, downloading"),
        }

        let tile = self.download(key).await?;
        if tile.source == TileSource::Network {
            self.store(cache, path, &tile.data).await;
        }
        Ok(tile)
    }

    /// Stores a downloaded tile. Failures are logged, not returned.
    async fn store(&self, cache: &TileCache, path: PathBuf, data: &[u8]) {
        let cache = cache.clone();
        let data = data.to_vec();
        let stored = tokio::task::spawn_blocking(move || cache.store(&path, &data)).await;

        match stored {
            Ok(Ok(())) => {}
            Ok(Err(TileCacheError::AlreadyExists { path })) => {
                debug!(path = %path.display(), "Tile already cached by another writer");
            }
            Ok(Err(e)) => warn!(error = %e, "Failed to store tile in cache"),
            Err(e) => warn!(error = %e, "Cache store task failed"),
        }
    }

    async fn download(&self, key: &TileKey) -> Result<FetchedTile, FetchError> {
        let url = self.provider.tile_url(key.zoom(), key.x(), key.y());
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.http_client.get(&url).await {
                Ok(data) => {
                    debug!(tile = %key, bytes = data.len(), attempt, "Tile downloaded");
                    return Ok(FetchedTile {
                        data,
                        source: TileSource::Network,
                    });
                }
                Err(ProviderError::NotFound { .. }) if self.provider.ignore_not_found => {
                    debug!(tile = %key, "Tile not found, using empty tile");
                    return Ok(FetchedTile {
                        data: Vec::new(),
                        source: TileSource::Missing,
                    });
                }
                Err(e) => {
                    let delay = if e.is_retryable() {
                        self.retry_policy.delay_for_attempt(attempt)
                    } else {
                        None
                    };
                    match delay {
                        Some(delay) => {
                            warn!(
                                tile = %key,
                                error = %e,
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                "Tile download failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            return Err(FetchError::Download {
                                key: key.clone(),
                                attempts: attempt,
                                source: e,
                            });
                        }
                    }
                }
            }
        }
    }
}
