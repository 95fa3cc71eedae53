//! tilecache CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tilecache library.

mod commands;
mod error;
mod runner;

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilecache::config::{config_file_path, ConfigFile};

use commands::cache::CacheAction;
use commands::common::{parse_range, DEFAULT_MAX_TILES};
use commands::fetch::FetchArgs;
use commands::prefetch::PrefetchArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "tilecache")]
#[command(version, about = "Fetch web map tiles and keep them in a disk cache", long_about = None)]
struct Cli {
    /// Config file (default: ~/.tilecache/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in tile providers
    Providers,

    /// Fetch one tile, from the cache when possible
    Fetch {
        /// Tile zoom level
        zoom: u8,
        /// Tile column
        x: u32,
        /// Tile row
        y: u32,
        /// Provider name (default: [provider] default in config.ini)
        #[arg(long, short)]
        provider: Option<String>,
        /// Write the tile to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Always download, neither reading nor writing the cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Download a block of tiles into the cache
    Prefetch {
        /// Zoom level to prefetch
        zoom: u8,
        /// Provider name (default: [provider] default in config.ini)
        #[arg(long, short)]
        provider: Option<String>,
        /// Column range, e.g. `10..20` (default: whole grid)
        #[arg(long, value_parser = parse_range)]
        x: Option<RangeInclusive<u32>>,
        /// Row range, e.g. `10..20` (default: whole grid)
        #[arg(long, value_parser = parse_range)]
        y: Option<RangeInclusive<u32>>,
        /// Refuse to prefetch more tiles than this
        #[arg(long, default_value_t = DEFAULT_MAX_TILES)]
        max_tiles: u64,
    },

    /// Inspect or clear the disk cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Write the configuration file with defaults
    Init {
        /// Rewrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.unwrap_or_else(config_file_path);

    match cli.command {
        Commands::Init { force } => commands::init::run(&config_path, force),
        Commands::Providers => {
            let config = ConfigFile::load_from(&config_path)?;
            commands::providers::run(&config.provider.default, cli.verbose);
            Ok(())
        }
        command => {
            let runner = CliRunner::new(Some(&config_path), cli.verbose)?;
            match command {
                Commands::Fetch {
                    zoom,
                    x,
                    y,
                    provider,
                    output,
                    no_cache,
                } => commands::fetch::run(
                    &runner,
                    FetchArgs {
                        provider,
                        zoom,
                        x,
                        y,
                        output,
                        no_cache,
                    },
                ),
                Commands::Prefetch {
                    zoom,
                    provider,
                    x,
                    y,
                    max_tiles,
                } => commands::prefetch::run(
                    &runner,
                    PrefetchArgs {
                        provider,
                        zoom,
                        x,
                        y,
                        max_tiles,
                    },
                ),
                Commands::Cache { action } => commands::cache::run(&runner, action),
                // Handled without a runner above
                Commands::Init { .. } | Commands::Providers => Ok(()),
            }
        }
    }
}
