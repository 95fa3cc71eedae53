//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[cache]
; Root directory for cached tiles. Tiles are stored as
; <directory>/<provider>/<zoom>/<x>/<y>
directory = {}
; Permission bits (octal) for directories created by the cache
dir_mode = {:04o}
; What happens when a tile is already cached:
;   overwrite - atomically replace it (default)
;   exclusive - keep the existing tile
write_mode = {}
; Set to false to always download and never store tiles
enabled = {}

[download]
; Request timeout in seconds
timeout = {}
; Attempts per tile, including the first one
max_attempts = {}
; Concurrent tile downloads when prefetching
parallel = {}
; User-Agent sent to tile servers. Public servers require an identifying value.
user_agent = {}

[provider]
; Provider used when none is given. Run `tilecache providers` for the list.
default = {}
"#,
        path_to_string(&config.cache.directory),
        config.cache.dir_mode,
        config.cache.write_mode.as_str(),
        config.cache.enabled,
        config.download.timeout,
        config.download.max_attempts,
        config.download.parallel,
        config.download.user_agent,
        config.provider.default,
    )
}

/// Path as a string, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.to_string_lossy().to_string()
}
