//! Provider types

use std::fmt;

/// Errors that can occur while downloading from a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Request could not be sent or the body could not be read
    HttpError(String),
    /// Server answered 404 for the tile
    NotFound { url: String },
    /// Server answered with a non-success status other than 404
    HttpStatus { status: u16, url: String },
}

impl ProviderError {
    /// Returns true if repeating the request might succeed.
    ///
    /// Transport failures, 5xx responses and 429 are retryable; a 404 or any
    /// other 4xx answer is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::HttpError(_) => true,
            ProviderError::NotFound { .. } => false,
            ProviderError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::NotFound { url } => write!(f, "Tile not found: {}", url),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything needed to download tiles from one tile service.
///
/// `url_pattern` contains four placeholders:
///
/// | placeholder | value                          |
/// |-------------|--------------------------------|
/// | `{s}`       | shard (CDN subdomain)          |
/// | `{z}`       | zoom level                     |
/// | `{x}`       | tile column                    |
/// | `{y}`       | tile row                       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProvider {
    /// Short identifier; tiles are cached under `{cache_dir}/{name}`.
    pub name: String,
    /// Attribution text required by the provider's terms.
    pub attribution: String,
    /// Treat a 404 as an empty tile instead of an error.
    pub ignore_not_found: bool,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// URL template, see the type-level docs.
    pub url_pattern: String,
    /// Interchangeable subdomains used to spread load; may be empty.
    pub shards: Vec<String>,
}

impl TileProvider {
    /// Creates a provider with 256px tiles and no shards.
    pub fn new(
        name: impl Into<String>,
        attribution: impl Into<String>,
        url_pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribution: attribution.into(),
            ignore_not_found: false,
            tile_size: 256,
            url_pattern: url_pattern.into(),
            shards: Vec::new(),
        }
    }

    /// Sets the shard list.
    pub fn with_shards<I, S>(mut self, shards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shards = shards.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tile edge length.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Treat 404 responses as empty tiles.
    pub fn with_ignore_not_found(mut self, ignore: bool) -> Self {
        self.ignore_not_found = ignore;
        self
    }

    /// Builds the request URL for one tile.
    pub fn url(&self, shard: &str, zoom: u8, x: u32, y: u32) -> String {
        self.url_pattern
            .replace("{s}", shard)
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Picks the shard for a tile.
    ///
    /// Neighbouring tiles land on different shards so a batch of requests
    /// spreads across all of them. Returns `""` when there are no shards.
    pub fn shard_for(&self, x: u32, y: u32) -> &str {
        if self.shards.is_empty() {
            return "";
        }
        let index = (u64::from(x) + u64::from(y)) % self.shards.len() as u64;
        &self.shards[index as usize]
    }

    /// Builds the URL for a tile using [`TileProvider::shard_for`].
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        self.url(self.shard_for(x, y), zoom, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sharded() -> TileProvider {
        TileProvider::new(
            "test",
            "Test data",
            "https://{s}.tiles.example/{z}/{x}/{y}.png",
        )
        .with_shards(["a", "b", "c"])
    }

    #[test]
    fn test_url_substitution() {
        let provider = sharded();
        assert_eq!(
            provider.url("b", 10, 200, 100),
            "https://b.tiles.example/10/200/100.png"
        );
    }

    #[test]
    fn test_url_placeholder_order_is_free() {
        let provider = TileProvider::new("arc", "", "https://host/tile/{z}/{y}/{x}");
        assert_eq!(provider.url("", 15, 200, 100), "https://host/tile/15/100/200");
    }

    #[test]
    fn test_shard_distribution() {
        let provider = sharded();
        assert_eq!(provider.shard_for(0, 0), "a");
        assert_eq!(provider.shard_for(0, 1), "b");
        assert_eq!(provider.shard_for(1, 1), "c");
        assert_eq!(provider.shard_for(1, 2), "a"); // Wraps around
    }

    #[test]
    fn test_shard_for_no_overflow() {
        let provider = sharded();
        // (u32::MAX + u32::MAX) would overflow u32
        assert_eq!(provider.shard_for(u32::MAX, u32::MAX), "a");
    }

    #[test]
    fn test_no_shards() {
        let provider = TileProvider::new("plain", "", "https://host/{z}/{x}/{y}.png");
        assert_eq!(provider.shard_for(5, 7), "");
        assert_eq!(provider.tile_url(3, 5, 7), "https://host/3/5/7.png");
    }

    #[test]
    fn test_builder_defaults() {
        let provider = TileProvider::new("p", "attr", "url");
        assert_eq!(provider.tile_size, 256);
        assert!(!provider.ignore_not_found);
        assert!(provider.shards.is_empty());

        let provider = provider.with_tile_size(512).with_ignore_not_found(true);
        assert_eq!(provider.tile_size, 512);
        assert!(provider.ignore_not_found);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ProviderError::HttpError("timeout".into()).is_retryable());
        assert!(ProviderError::HttpStatus {
            status: 503,
            url: "u".into()
        }
        .is_retryable());
        assert!(ProviderError::HttpStatus {
            status: 429,
            url: "u".into()
        }
        .is_retryable());
        assert!(!ProviderError::HttpStatus {
            status: 403,
            url: "u".into()
        }
        .is_retryable());
        assert!(!ProviderError::NotFound { url: "u".into() }.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::HttpStatus {
            status: 500,
            url: "https://a.example/1/2/3.png".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500 from https://a.example/1/2/3.png");
    }
}
