//! tilecache - on-disk caching for web map tiles
//!
//! This library fetches raster map tiles from public tile servers and keeps
//! them in a filesystem cache so that repeated renders of the same area do
//! not hit the network again.
//!
//! # Modules
//!
//! - [`coord`]: Tile keys (`provider/zoom/x/y`)
//! - [`cache`]: Filesystem-backed tile store with atomic writes
//! - [`provider`]: Built-in tile provider catalog and HTTP client abstraction
//! - [`fetcher`]: Cache-first tile fetching with retries and batch downloads
//! - [`config`]: `~/.tilecache/config.ini` handling
//! - [`logging`]: Tracing subscriber setup for binaries

pub mod cache;
pub mod config;
pub mod coord;
pub mod fetcher;
pub mod logging;
pub mod provider;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
