//! Filesystem tile cache.
//!
//! Tiles are stored as plain files, one per [`TileKey`](crate::coord::TileKey),
//! under a hierarchy that mirrors the key:
//!
//! ```text
//! <cache_dir>/<provider>/<zoom>/<x>/<y>
//! ```
//!
//! The file contents are exactly the bytes the provider returned; there is no
//! header or sidecar metadata. Writes go through a temporary file and an
//! atomic rename, so a concurrent reader sees either the old entry, the new
//! entry, or nothing, never a truncated file.
//!
//! # Example
//!
//! ```no_run
//! use tilecache::cache::{TileCache, DEFAULT_DIR_MODE};
//! use tilecache::coord::TileKey;
//!
//! let cache = TileCache::new("/tmp/tiles", DEFAULT_DIR_MODE);
//! let key = TileKey::new("osm", 3, 1, 2)?;
//!
//! cache.store_tile(&key, &[0, 1, 2, 3])?;
//! assert_eq!(cache.load(&key)?, Some(vec![0, 1, 2, 3]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod maintenance;
mod path;
mod store;

pub use error::TileCacheError;
pub use maintenance::{clear_disk_cache, disk_cache_stats, ClearResult, DiskCacheStats};
pub use path::{provider_directory, tile_path};
pub use store::{TileCache, WriteMode, DEFAULT_DIR_MODE};
