//! Operator-driven cache maintenance: statistics and invalidation.
//!
//! The cache never deletes entries on its own. When a provider changes its
//! tile version the operator clears that provider's directory (or the whole
//! cache) with [`clear_disk_cache`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use super::path::provider_directory;
use crate::coord::validate_provider_name;

/// Statistics about the on-disk cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskCacheStats {
    /// Total number of entry files.
    pub files: u64,
    /// Total size of entry files in bytes.
    pub bytes: u64,
    /// `(files, bytes)` per provider directory.
    pub providers: BTreeMap<String, (u64, u64)>,
}

/// Result of clearing cache entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    /// Number of files removed.
    pub files_deleted: u64,
    /// Bytes freed.
    pub bytes_freed: u64,
}

/// Walks the cache root and counts entries per provider.
///
/// A missing root is reported as an empty cache. Leftover temporary files
/// from interrupted writes are not counted.
pub fn disk_cache_stats(cache_dir: &Path) -> io::Result<DiskCacheStats> {
    let mut stats = DiskCacheStats::default();

    let entries = match fs::read_dir(cache_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(stats),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let (files, bytes) = count_files(&entry.path())?;
        stats.files += files;
        stats.bytes += bytes;
        stats.providers.insert(name, (files, bytes));
    }

    Ok(stats)
}

/// Removes cached entries.
///
/// With `provider` set only that provider's directory is removed; otherwise
/// every provider directory under `cache_dir` is. The root directory itself
/// is kept.
pub fn clear_disk_cache(cache_dir: &Path, provider: Option<&str>) -> io::Result<ClearResult> {
    let targets = match provider {
        Some(name) => {
            validate_provider_name(name)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            vec![provider_directory(cache_dir, name)]
        }
        None => match fs::read_dir(cache_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        },
    };

    let mut result = ClearResult::default();
    for dir in targets {
        if !dir.is_dir() {
            continue;
        }
        let (files, bytes) = count_files(&dir)?;
        fs::remove_dir_all(&dir)?;
        result.files_deleted += files;
        result.bytes_freed += bytes;
    }

    info!(
        cache_dir = %cache_dir.display(),
        provider = provider.unwrap_or("*"),
        files = result.files_deleted,
        bytes = result.bytes_freed,
        "Cleared disk cache"
    );

    Ok(result)
}

fn count_files(dir: &Path) -> io::Result<(u64, u64)> {
    let mut files = 0;
    let mut bytes = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let (f, b) = count_files(&entry.path())?;
            files += f;
            bytes += b;
        } else if file_type.is_file() {
            if is_temp_file(&entry.file_name().to_string_lossy()) {
                continue;
            }
            match entry.metadata() {
                Ok(meta) => {
                    files += 1;
                    bytes += meta.len();
                }
                // Raced with a concurrent rename or removal
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Failed to stat cache entry");
                }
            }
        }
    }

    Ok((files, bytes))
}

fn is_temp_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}
