//! Tile keys.
//!
//! A [`TileKey`] names exactly one tile image: the provider it came from plus
//! its Web Mercator `zoom/x/y` address. Keys are immutable once built and are
//! the only input to cache path derivation, so the provider name is checked
//! at construction time to be a single, safe path component.

use std::fmt;

use thiserror::Error;

/// Highest zoom level a tile key may carry.
///
/// At zoom 32 the tile grid is 2^32 wide, which no longer fits `u32` indices.
pub const MAX_ZOOM: u8 = 31;

/// Errors raised when constructing a [`TileKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Provider name is empty.
    #[error("provider name must not be empty")]
    EmptyProvider,

    /// Provider name cannot be used as a single directory name.
    #[error("provider name '{0}' is not a valid path component")]
    InvalidProvider(String),

    /// Zoom level beyond what `u32` tile indices can address.
    #[error("zoom level {0} exceeds maximum {MAX_ZOOM}")]
    ZoomOutOfRange(u8),
}

/// Identifies one cached tile: `{provider, zoom, x, y}`.
///
/// # Example
///
/// ```
/// use tilecache::coord::TileKey;
///
/// let key = TileKey::new("osm", 3, 1, 2).unwrap();
/// assert_eq!(key.to_string(), "osm/3/1/2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    provider: String,
    zoom: u8,
    x: u32,
    y: u32,
}

impl TileKey {
    /// Creates a tile key, validating the provider name and zoom level.
    pub fn new(provider: impl Into<String>, zoom: u8, x: u32, y: u32) -> Result<Self, KeyError> {
        let provider = provider.into();
        validate_provider_name(&provider)?;
        if zoom > MAX_ZOOM {
            return Err(KeyError::ZoomOutOfRange(zoom));
        }

        Ok(Self {
            provider,
            zoom,
            x,
            y,
        })
    }

    /// Provider name, used as the top-level cache directory.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Tile column (west to east).
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Tile row (north to south).
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Returns true if `x` and `y` fall inside the `2^zoom` grid.
    ///
    /// Keys outside the grid are still valid cache keys; providers will
    /// simply answer them with an error.
    pub fn in_grid(&self) -> bool {
        let size = 1u64 << self.zoom;
        u64::from(self.x) < size && u64::from(self.y) < size
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.provider, self.zoom, self.x, self.y)
    }
}

/// Checks that `name` is usable as exactly one directory component.
pub fn validate_provider_name(name: &str) -> Result<(), KeyError> {
    if name.is_empty() {
        return Err(KeyError::EmptyProvider);
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(KeyError::InvalidProvider(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_key() {
        let key = TileKey::new("osm", 3, 1, 2).unwrap();
        assert_eq!(key.provider(), "osm");
        assert_eq!(key.zoom(), 3);
        assert_eq!(key.x(), 1);
        assert_eq!(key.y(), 2);
    }

    #[test]
    fn test_display() {
        let key = TileKey::new("carto-light", 15, 17000, 11000).unwrap();
        assert_eq!(key.to_string(), "carto-light/15/17000/11000");
    }

    #[test]
    fn test_rejects_empty_provider() {
        assert_eq!(TileKey::new("", 0, 0, 0), Err(KeyError::EmptyProvider));
    }

    #[test]
    fn test_rejects_path_like_providers() {
        for name in [".", "..", "a/b", "a\\b", "nul\0"] {
            let result = TileKey::new(name, 0, 0, 0);
            assert!(
                matches!(result, Err(KeyError::InvalidProvider(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_accepts_dotted_provider_name() {
        // Only the exact "." and ".." components are special
        assert!(TileKey::new("tiles.example", 0, 0, 0).is_ok());
        assert!(TileKey::new("...", 0, 0, 0).is_ok());
    }

    #[test]
    fn test_zoom_limit() {
        assert!(TileKey::new("osm", MAX_ZOOM, 0, 0).is_ok());
        assert_eq!(
            TileKey::new("osm", MAX_ZOOM + 1, 0, 0),
            Err(KeyError::ZoomOutOfRange(MAX_ZOOM + 1))
        );
    }

    #[test]
    fn test_in_grid() {
        assert!(TileKey::new("osm", 0, 0, 0).unwrap().in_grid());
        assert!(!TileKey::new("osm", 0, 1, 0).unwrap().in_grid());
        assert!(TileKey::new("osm", 3, 7, 7).unwrap().in_grid());
        assert!(!TileKey::new("osm", 3, 8, 7).unwrap().in_grid());
        assert!(TileKey::new("osm", 31, u32::MAX >> 1, 0).unwrap().in_grid());
    }
}
