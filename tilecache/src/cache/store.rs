//! Tile cache store/load implementation.

use std::fs::{self, DirBuilder};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::error::TileCacheError;
use super::path::tile_path;
use crate::coord::TileKey;

/// Default permission bits for created cache directories (owner only).
pub const DEFAULT_DIR_MODE: u32 = 0o700;

/// What a store does when the destination entry already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Atomically replace the existing entry.
    #[default]
    Overwrite,
    /// Fail with [`TileCacheError::AlreadyExists`] and keep the existing entry.
    Exclusive,
}

impl WriteMode {
    /// Config file representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Overwrite => "overwrite",
            WriteMode::Exclusive => "exclusive",
        }
    }
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(WriteMode::Overwrite),
            "exclusive" => Ok(WriteMode::Exclusive),
            other => Err(format!("unknown write mode '{}'", other)),
        }
    }
}

/// Filesystem-backed tile store.
///
/// Holds only the root directory, the permission bits used for directories
/// it creates, and the [`WriteMode`]. Construction never touches the
/// filesystem; the directory chain is created lazily by the first store.
///
/// `TileCache` is cheap to clone and safe to use from many threads at once:
/// every store writes a uniquely named temporary file next to its target and
/// renames it into place.
#[derive(Debug, Clone)]
pub struct TileCache {
    root: PathBuf,
    dir_mode: u32,
    write_mode: WriteMode,
}

impl TileCache {
    /// Creates a cache rooted at `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Cache root directory (need not exist yet)
    /// * `dir_mode` - Permission bits for every directory the cache creates
    pub fn new(root: impl Into<PathBuf>, dir_mode: u32) -> Self {
        Self {
            root: root.into(),
            dir_mode,
            write_mode: WriteMode::default(),
        }
    }

    /// Sets the behaviour for stores hitting an existing entry.
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Returns the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory permission bits.
    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }

    /// Returns the configured write mode.
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Path of the entry for `key`. Pure; performs no I/O.
    pub fn tile_path(&self, key: &TileKey) -> PathBuf {
        tile_path(&self.root, key)
    }

    /// Returns true if an entry for `key` exists.
    pub fn contains(&self, key: &TileKey) -> bool {
        self.tile_path(key).is_file()
    }

    /// Loads the entry for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` on a cache hit
    /// - `Ok(None)` if the entry does not exist
    /// - `Err(_)` for any other I/O failure
    pub fn load(&self, key: &TileKey) -> Result<Option<Vec<u8>>, TileCacheError> {
        self.load_path(&self.tile_path(key))
    }

    /// Loads the entry stored at `path`. See [`TileCache::load`].
    pub fn load_path(&self, path: &Path) -> Result<Option<Vec<u8>>, TileCacheError> {
        match fs::read(path) {
            Ok(data) => {
                trace!(path = %path.display(), bytes = data.len(), "Cache hit");
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "Cache miss");
                Ok(None)
            }
            Err(source) => Err(TileCacheError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Stores `data` as the entry for `key`.
    pub fn store_tile(&self, key: &TileKey, data: &[u8]) -> Result<(), TileCacheError> {
        self.store(&self.tile_path(key), data)
    }

    /// Stores `data` at `path`, creating parent directories as needed.
    ///
    /// The data is written to a temporary file in the destination directory
    /// and then renamed over `path`. If anything fails the temporary file is
    /// removed and `path` is left as it was.
    ///
    /// # Errors
    ///
    /// - [`TileCacheError::AlreadyExists`] in [`WriteMode::Exclusive`] when
    ///   `path` already exists
    /// - [`TileCacheError::CreateDir`] if a parent directory cannot be created
    /// - [`TileCacheError::Write`] if writing or renaming fails
    pub fn store(&self, path: &Path, data: &[u8]) -> Result<(), TileCacheError> {
        let parent = match (path.parent(), path.file_name()) {
            (Some(parent), Some(_)) if !parent.as_os_str().is_empty() => parent,
            _ => {
                return Err(TileCacheError::InvalidPath {
                    path: path.to_path_buf(),
                })
            }
        };

        if self.write_mode == WriteMode::Exclusive && path.exists() {
            return Err(TileCacheError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        if !parent.is_dir() {
            create_dirs(parent, self.dir_mode).map_err(|source| TileCacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let write_err = |source: io::Error| TileCacheError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Dot-prefixed so directory scans never mistake it for an entry
        let mut temp = tempfile::Builder::new()
            .prefix(".tile-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(write_err)?;
        temp.write_all(data).map_err(write_err)?;
        temp.as_file().sync_data().map_err(write_err)?;

        let persisted = match self.write_mode {
            WriteMode::Overwrite => temp.persist(path),
            WriteMode::Exclusive => temp.persist_noclobber(path),
        };

        match persisted {
            Ok(_) => {
                debug!(path = %path.display(), bytes = data.len(), "Stored cache entry");
                Ok(())
            }
            // Lost a race with another exclusive writer
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Err(TileCacheError::AlreadyExists {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(write_err(e.error)),
        }
    }
}

/// Creates `path` and any missing ancestors with `mode`.
///
/// Directories that already exist, including ones created concurrently by
/// another writer, are not an error.
fn create_dirs(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}
