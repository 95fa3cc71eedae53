//! Map tile providers.
//!
//! A [`TileProvider`] is plain configuration: a name (which doubles as the
//! cache directory), a URL template, an optional list of CDN shards and the
//! attribution text the rendered map must carry. The built-in catalog is
//! returned by [`all_providers`]; nothing here holds global state.
//!
//! Downloads go through the [`AsyncHttpClient`] trait so the fetcher can be
//! tested against [`MockAsyncHttpClient`] instead of the network.
//!
//! ```
//! use tilecache::provider::lookup;
//!
//! let osm = lookup("osm").unwrap();
//! let shard = osm.shard_for(1, 2);
//! assert_eq!(osm.url(shard, 3, 1, 2), "https://a.tile.openstreetmap.org/3/1/2.png");
//! ```

mod catalog;
mod http;
mod types;

pub use catalog::{all_providers, lookup, provider_names};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use types::{ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
