//! Batch fetch results.

use std::fmt;

use super::error::FetchError;
use super::tile_fetcher::{FetchedTile, TileSource};
use crate::coord::TileKey;

/// Counts for one `fetch_many` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tiles requested.
    pub requested: usize,
    /// Tiles served from the cache.
    pub cache_hits: usize,
    /// Tiles downloaded from the provider.
    pub downloaded: usize,
    /// Tiles the provider reported as missing (`ignore_not_found`).
    pub missing: usize,
    /// Tiles that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Tallies per-tile results.
    pub fn from_results(results: &[(TileKey, Result<FetchedTile, FetchError>)]) -> Self {
        let mut summary = Self {
            requested: results.len(),
            ..Self::default()
        };
        for (_, result) in results {
            match result {
                Ok(tile) => match tile.source {
                    TileSource::Cache => summary.cache_hits += 1,
                    TileSource::Network => summary.downloaded += 1,
                    TileSource::Missing => summary.missing += 1,
                },
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Number of tiles that produced data (cached or downloaded).
    pub fn succeeded(&self) -> usize {
        self.cache_hits + self.downloaded + self.missing
    }

    /// Adds another batch's counts to this one.
    pub fn merge(&mut self, other: &BatchSummary) {
        self.requested += other.requested;
        self.cache_hits += other.cache_hits;
        self.downloaded += other.downloaded;
        self.missing += other.missing;
        self.failed += other.failed;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tiles: {} cached, {} downloaded, {} missing, {} failed",
            self.requested, self.cache_hits, self.downloaded, self.missing, self.failed
        )
    }
}

/// Per-tile outcome of a batch, in request order.
#[derive(Debug)]
pub struct BatchResult {
    /// One entry per requested key.
    pub results: Vec<(TileKey, Result<FetchedTile, FetchError>)>,
    /// Aggregate counts.
    pub summary: BatchSummary,
}

impl BatchResult {
    pub(crate) fn new(results: Vec<(TileKey, Result<FetchedTile, FetchError>)>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self { results, summary }
    }

    /// Iterates over the failures.
    pub fn failures(&self) -> impl Iterator<Item = (&TileKey, &FetchError)> {
        self.results
            .iter()
            .filter_map(|(key, result)| result.as_ref().err().map(|e| (key, e)))
    }
}
