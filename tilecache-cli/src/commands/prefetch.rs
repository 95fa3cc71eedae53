//! Prefetch command - warm the cache for a block of tiles.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use tilecache::coord::TileKey;
use tilecache::fetcher::BatchSummary;

use super::common::{grid_range, range_len};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Tiles handed to the fetcher per progress update, per parallel slot.
const CHUNK_PER_SLOT: usize = 4;

/// Arguments for the prefetch command.
pub struct PrefetchArgs {
    pub provider: Option<String>,
    pub zoom: u8,
    /// Column range; whole grid when `None`
    pub x: Option<RangeInclusive<u32>>,
    /// Row range; whole grid when `None`
    pub y: Option<RangeInclusive<u32>>,
    /// Refuse to fetch more tiles than this
    pub max_tiles: u64,
}

/// Run the prefetch command.
pub fn run(runner: &CliRunner, args: PrefetchArgs) -> Result<(), CliError> {
    runner.log_startup("prefetch");

    let xs = grid_range(args.zoom, args.x, "x")?;
    let ys = grid_range(args.zoom, args.y, "y")?;
    let total = range_len(&xs) * range_len(&ys);
    if total > args.max_tiles {
        return Err(CliError::InvalidTile(format!(
            "{} tiles requested, limit is {} (use --max-tiles to raise it)",
            total, args.max_tiles
        )));
    }

    let provider = runner.resolve_provider(args.provider.as_deref())?;
    let name = provider.name.clone();
    let fetcher = runner.create_fetcher(provider, true)?;
    if fetcher.cache().is_none() {
        warn!("Cache is disabled in config.ini, prefetched tiles will not be kept");
    }

    let keys = xs
        .flat_map(|x| ys.clone().map(move |y| (x, y)))
        .map(|(x, y)| TileKey::new(name.as_str(), args.zoom, x, y))
        .collect::<Result<Vec<_>, _>>()?;

    println!(
        "Prefetching {} tiles from {} at zoom {}",
        keys.len(),
        name,
        args.zoom
    );

    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} tiles ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(200));

    let start = Instant::now();
    let chunk_size = runner.config().download.parallel.max(1) * CHUNK_PER_SLOT;
    let summary = runner.block_on(async {
        let mut summary = BatchSummary::default();
        for chunk in keys.chunks(chunk_size) {
            let batch = fetcher.fetch_many(chunk.to_vec()).await;
            summary.merge(&batch.summary);
            progress.inc(chunk.len() as u64);
        }
        summary
    })?;
    progress.finish_and_clear();

    println!(
        "{} in {:.1}s",
        summary,
        start.elapsed().as_secs_f64()
    );

    if summary.failed > 0 {
        return Err(CliError::Prefetch {
            failed: summary.failed,
            requested: summary.requested,
        });
    }
    Ok(())
}
