//! Fetch command - fetch one tile through the cache.

use std::io::{self, Write};
use std::path::PathBuf;

use tilecache::fetcher::TileSource;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub provider: Option<String>,
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
    /// Write tile bytes here; stdout when `None`
    pub output: Option<PathBuf>,
    /// Bypass the cache for this fetch
    pub no_cache: bool,
}

/// Run the fetch command.
pub fn run(runner: &CliRunner, args: FetchArgs) -> Result<(), CliError> {
    runner.log_startup("fetch");

    let provider = runner.resolve_provider(args.provider.as_deref())?;
    let fetcher = runner.create_fetcher(provider, !args.no_cache)?;
    let key = fetcher.key(args.zoom, args.x, args.y)?;

    if !key.in_grid() {
        return Err(CliError::InvalidTile(format!(
            "{} is outside the zoom {} grid",
            key,
            key.zoom()
        )));
    }

    let tile = runner.block_on(fetcher.fetch(&key))??;

    let origin = match tile.source {
        TileSource::Cache => "cache",
        TileSource::Network => "network",
        TileSource::Missing => "provider (not found, empty tile)",
    };
    eprintln!("{}: {} bytes from {}", key, tile.data.len(), origin);
    if let Some(path) = fetcher.cache_path(&key) {
        eprintln!("Cache entry: {}", path.display());
    }

    match args.output {
        Some(path) => std::fs::write(&path, &tile.data).map_err(|error| CliError::FileWrite {
            path: path.display().to_string(),
            error,
        }),
        None => io::stdout()
            .lock()
            .write_all(&tile.data)
            .map_err(|error| CliError::FileWrite {
                path: "<stdout>".to_string(),
                error,
            }),
    }
}
