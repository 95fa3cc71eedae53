//! Cache error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`TileCache`](super::TileCache) operations.
///
/// A cache miss is not an error: loads report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TileCacheError {
    /// Exclusive store targeted an entry that already exists.
    #[error("cache entry already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A parent directory could not be created.
    #[error("failed to create cache directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Writing the entry (temp file, data or rename) failed.
    #[error("failed to write cache entry {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Reading an entry failed for a reason other than it being absent.
    #[error("failed to read cache entry {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The store path has no parent directory or file name.
    #[error("invalid cache entry path: {}", path.display())]
    InvalidPath { path: PathBuf },
}

impl TileCacheError {
    /// Returns true for the exclusive-create conflict.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, TileCacheError::AlreadyExists { .. })
    }

    /// The filesystem path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            TileCacheError::AlreadyExists { path }
            | TileCacheError::CreateDir { path, .. }
            | TileCacheError::Write { path, .. }
            | TileCacheError::Read { path, .. }
            | TileCacheError::InvalidPath { path } => path,
        }
    }
}
