//! Cache management CLI commands.

use clap::Subcommand;
use tilecache::cache::{clear_disk_cache, disk_cache_stats};
use tilecache::config::format_size;
use tilecache::provider::lookup;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Print the cache directory
    Path,
    /// Show disk cache statistics
    Stats,
    /// Delete cached tiles, for one provider or all of them
    Clear {
        /// Only clear tiles of this provider
        #[arg(long)]
        provider: Option<String>,
    },
}

/// Run a cache subcommand.
pub fn run(runner: &CliRunner, action: CacheAction) -> Result<(), CliError> {
    let cache_dir = &runner.config().cache.directory;

    match action {
        CacheAction::Path => {
            println!("{}", cache_dir.display());
            Ok(())
        }
        CacheAction::Stats => {
            println!("Disk cache: {}", cache_dir.display());

            let stats = disk_cache_stats(cache_dir).map_err(CliError::CacheStats)?;
            println!("  Files: {}", stats.files);
            println!("  Size:  {}", format_size(stats.bytes));
            if !stats.providers.is_empty() {
                println!();
                for (provider, (files, bytes)) in &stats.providers {
                    println!("  {:<24} {:>8} files  {}", provider, files, format_size(*bytes));
                }
            }
            Ok(())
        }
        CacheAction::Clear { provider } => {
            runner.log_startup("cache clear");
            let provider = provider.as_deref().map(cache_provider_name);
            match &provider {
                Some(name) => println!(
                    "Clearing {} tiles from disk cache at: {}",
                    name,
                    cache_dir.display()
                ),
                None => println!("Clearing disk cache at: {}", cache_dir.display()),
            }

            let result =
                clear_disk_cache(cache_dir, provider.as_deref()).map_err(CliError::CacheClear)?;
            println!(
                "Deleted {} files, freed {}",
                result.files_deleted,
                format_size(result.bytes_freed)
            );
            Ok(())
        }
    }
}

/// Directory name used for `name`: the catalog spelling, or lowercase for
/// providers outside the catalog.
fn cache_provider_name(name: &str) -> String {
    lookup(name)
        .map(|provider| provider.name)
        .unwrap_or_else(|| name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_provider_name() {
        assert_eq!(cache_provider_name("OSM"), "osm");
        assert_eq!(cache_provider_name("Carto-Dark"), "carto-dark");
        assert_eq!(cache_provider_name("My-Tiles"), "my-tiles");
    }
}
