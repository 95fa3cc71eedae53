//! Cache path construction.

use std::path::{Path, PathBuf};

use crate::coord::TileKey;

/// Construct the full path for a cached tile.
///
/// Creates a hierarchical path structure:
/// ```text
/// <cache_dir>/<provider>/<zoom>/<x>/<y>
/// ```
///
/// Every component is either the (validated) provider name or a decimal
/// integer, so distinct keys never share a path.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tilecache::cache::tile_path;
/// use tilecache::coord::TileKey;
///
/// let key = TileKey::new("osm", 3, 1, 2).unwrap();
/// let path = tile_path(&PathBuf::from("/cache"), &key);
///
/// assert_eq!(path, PathBuf::from("/cache/osm/3/1/2"));
/// ```
pub fn tile_path(cache_dir: &Path, key: &TileKey) -> PathBuf {
    cache_dir
        .join(key.provider())
        .join(key.zoom().to_string())
        .join(key.x().to_string())
        .join(key.y().to_string())
}

/// Get the provider directory path.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tilecache::cache::provider_directory;
///
/// let dir = provider_directory(&PathBuf::from("/cache"), "osm");
/// assert_eq!(dir, PathBuf::from("/cache/osm"));
/// ```
pub fn provider_directory(cache_dir: &Path, provider: &str) -> PathBuf {
    cache_dir.join(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tile_path_layout() {
        let key = TileKey::new("osm", 3, 1, 2).unwrap();
        let path = tile_path(Path::new("/tmp/x"), &key);
        assert_eq!(path, PathBuf::from("/tmp/x/osm/3/1/2"));
    }

    #[test]
    fn test_tile_path_large_coordinates() {
        let key = TileKey::new("arcgis-worldimagery", 19, 262143, 524287).unwrap();
        let path = tile_path(Path::new("/cache"), &key);
        assert_eq!(
            path,
            PathBuf::from("/cache/arcgis-worldimagery/19/262143/524287")
        );
    }

    #[test]
    fn test_tile_path_under_provider_directory() {
        let root = Path::new("/cache");
        let key = TileKey::new("wikimedia", 5, 10, 11).unwrap();
        assert!(tile_path(root, &key).starts_with(provider_directory(root, "wikimedia")));
    }

    #[test]
    fn test_x_and_y_not_interchangeable() {
        let root = Path::new("/cache");
        let a = TileKey::new("osm", 4, 1, 2).unwrap();
        let b = TileKey::new("osm", 4, 2, 1).unwrap();
        assert_ne!(tile_path(root, &a), tile_path(root, &b));
    }

    fn provider_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9.-]{0,15}"
    }

    fn tile_key() -> impl Strategy<Value = TileKey> {
        (provider_name(), 0u8..=20, any::<u32>(), any::<u32>())
            .prop_map(|(p, z, x, y)| TileKey::new(p, z, x, y).unwrap())
    }

    proptest! {
        #[test]
        fn prop_tile_path_is_deterministic(key in tile_key()) {
            let root = Path::new("/cache");
            prop_assert_eq!(tile_path(root, &key), tile_path(root, &key.clone()));
        }

        #[test]
        fn prop_distinct_keys_have_distinct_paths(a in tile_key(), b in tile_key()) {
            let root = Path::new("/cache");
            prop_assume!(a != b);
            prop_assert_ne!(tile_path(root, &a), tile_path(root, &b));
        }

        #[test]
        fn prop_tile_path_stays_under_root(key in tile_key()) {
            let root = Path::new("/cache");
            let path = tile_path(root, &key);
            prop_assert!(path.starts_with(root));
            prop_assert_eq!(path.components().count(), root.components().count() + 4);
        }
    }
}
