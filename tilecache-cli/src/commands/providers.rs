//! Providers command - list the built-in tile providers.

use tilecache::provider::all_providers;

/// Run the providers command.
///
/// `default` is marked with `*` in the listing.
pub fn run(default: &str, verbose: bool) {
    let providers = all_providers();
    let width = providers.iter().map(|p| p.name.len()).max().unwrap_or(0);

    println!("Available tile providers:");
    println!();
    for provider in &providers {
        let marker = if provider.name == default { "*" } else { " " };
        println!(
            "{} {:<width$}  {}px  {}",
            marker,
            provider.name,
            provider.tile_size,
            provider.attribution,
            width = width
        );
        if verbose {
            println!("    {}", provider.url_pattern);
            if !provider.shards.is_empty() {
                println!("    shards: {}", provider.shards.join(", "));
            }
        }
    }
    println!();
    println!("* default provider ([provider] default in config.ini)");
}
