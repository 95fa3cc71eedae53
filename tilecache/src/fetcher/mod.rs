//! Cache-first tile fetching.
//!
//! [`TileFetcher`] ties one [`TileProvider`](crate::provider::TileProvider)
//! to an HTTP client and an optional [`TileCache`](crate::cache::TileCache):
//!
//! ```text
//! fetch(key) ──► cache.load ──hit──► bytes
//!                   │
//!                  miss
//!                   ▼
//!            provider URL (shard) ──► HTTP GET (retry/backoff)
//!                   │
//!                   ▼
//!              cache.store ──► bytes
//! ```
//!
//! Cache I/O runs on tokio's blocking pool. Concurrent fetches of the same
//! key share a per-key lock so only the first one goes to the network.
//!
//! # Example
//!
//! ```ignore
//! use tilecache::cache::{TileCache, DEFAULT_DIR_MODE};
//! use tilecache::fetcher::TileFetcher;
//! use tilecache::provider::{lookup, AsyncReqwestClient};
//!
//! let fetcher = TileFetcher::new(lookup("osm").unwrap(), AsyncReqwestClient::new()?)
//!     .with_cache(TileCache::new("/tmp/tiles", DEFAULT_DIR_MODE));
//!
//! let key = fetcher.key(3, 1, 2)?;
//! let tile = fetcher.fetch(&key).await?;
//! ```

mod batch;
mod error;
mod policy;
mod tile_fetcher;

pub use batch::{BatchResult, BatchSummary};
pub use error::FetchError;
pub use policy::{
    RetryPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_DELAY_SECS,
};
pub use tile_fetcher::{FetchedTile, TileFetcher, TileSource, DEFAULT_PARALLEL_FETCHES};
