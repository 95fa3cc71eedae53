//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::validate_provider_name;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = get(section, "directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache.directory = expand_tilde(v);
            }
        }
        if let Some(v) = get(section, "dir_mode") {
            config.cache.dir_mode = parse_mode(v).ok_or_else(|| ConfigFileError::InvalidValue {
                section: "cache".to_string(),
                key: "dir_mode".to_string(),
                value: v.to_string(),
                reason: "must be an octal permission mode like 0700 or 0755".to_string(),
            })?;
        }
        if let Some(v) = get(section, "write_mode") {
            config.cache.write_mode = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "cache".to_string(),
                key: "write_mode".to_string(),
                value: v.to_string(),
                reason: "must be 'overwrite' or 'exclusive'".to_string(),
            })?;
        }
        if let Some(v) = get(section, "enabled") {
            config.cache.enabled = parse_bool(v).ok_or_else(|| ConfigFileError::InvalidValue {
                section: "cache".to_string(),
                key: "enabled".to_string(),
                value: v.to_string(),
                reason: "must be 'true' or 'false'".to_string(),
            })?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = get(section, "timeout") {
            config.download.timeout = parse_positive(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                }
            })?;
        }
        if let Some(v) = get(section, "max_attempts") {
            config.download.max_attempts = parse_positive(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "max_attempts".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer".to_string(),
                }
            })?;
        }
        if let Some(v) = get(section, "parallel") {
            config.download.parallel = parse_positive(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "parallel".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer".to_string(),
                }
            })?;
        }
        if let Some(v) = get(section, "user_agent") {
            let v = v.trim();
            if !v.is_empty() {
                config.download.user_agent = v.to_string();
            }
        }
    }

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = get(section, "default") {
            let v = v.trim().to_lowercase();
            if validate_provider_name(&v).is_err() {
                return Err(ConfigFileError::InvalidValue {
                    section: "provider".to_string(),
                    key: "default".to_string(),
                    value: v,
                    reason: "must be a provider name like 'osm'".to_string(),
                });
            }
            config.provider.default = v;
        }
    }

    Ok(config)
}

/// Value of `key` with any trailing `; comment` or `# comment` removed.
///
/// A comment marker only counts when it starts the value or follows
/// whitespace, so `a;b` and `x#1` are kept intact.
fn get<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(strip_inline_comment)
}

fn strip_inline_comment(value: &str) -> &str {
    let mut prev_is_space = true;
    for (i, c) in value.char_indices() {
        if (c == ';' || c == '#') && prev_is_space {
            return value[..i].trim_end();
        }
        prev_is_space = c.is_whitespace();
    }
    value.trim_end()
}

/// Octal permission bits, with or without a leading `0` or `0o`.
fn parse_mode(value: &str) -> Option<u32> {
    let v = value.trim();
    let digits = v.strip_prefix("0o").unwrap_or(v);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 8).ok().filter(|mode| *mode <= 0o7777)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|n| *n > T::default())
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::WriteMode;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[cache]
directory = /srv/tiles
dir_mode = 0750
write_mode = exclusive
enabled = false

[download]
timeout = 10
max_attempts = 5
parallel = 16
user_agent = my-app/2.0

[provider]
default = Wikimedia
"#,
        )
        .unwrap();

        assert_eq!(config.cache.directory, PathBuf::from("/srv/tiles"));
        assert_eq!(config.cache.dir_mode, 0o750);
        assert_eq!(config.cache.write_mode, WriteMode::Exclusive);
        assert!(!config.cache.enabled);
        assert_eq!(config.download.timeout, 10);
        assert_eq!(config.download.max_attempts, 5);
        assert_eq!(config.download.parallel, 16);
        assert_eq!(config.download.user_agent, "my-app/2.0");
        assert_eq!(config.provider.default, "wikimedia");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = load(
            r#"
[download]
parallel = 2
unknown_key = ignored
"#,
        )
        .unwrap();

        let default = ConfigFile::default();
        assert_eq!(config.download.parallel, 2);
        assert_eq!(config.download.timeout, default.download.timeout);
        assert_eq!(config.cache, default.cache);
    }

    #[test]
    fn test_invalid_dir_mode() {
        let err = load("[cache]\ndir_mode = 0999\n").unwrap_err();
        assert!(err.to_string().contains("dir_mode"));
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_write_mode() {
        let err = load("[cache]\nwrite_mode = sometimes\n").unwrap_err();
        assert!(err.to_string().contains("'overwrite' or 'exclusive'"));
    }

    #[test]
    fn test_zero_parallel_rejected() {
        let err = load("[download]\nparallel = 0\n").unwrap_err();
        assert!(err.to_string().contains("download.parallel"));
    }

    #[test]
    fn test_invalid_provider_name() {
        let err = load("[provider]\ndefault = ../etc\n").unwrap_err();
        assert!(err.to_string().contains("provider.default"));
    }

    #[test]
    fn test_inline_comments_are_ignored() {
        let config = load(
            r#"
[cache]
directory = /srv/tiles   ; tilde expanded
dir_mode = 0750          ; octal
write_mode = exclusive   # overwrite | exclusive
enabled = true ; on

[download]
timeout = 12 ; seconds
user_agent = app/1.0 (X11;Linux) ; identify yourself
"#,
        )
        .unwrap();

        assert_eq!(config.cache.directory, PathBuf::from("/srv/tiles"));
        assert_eq!(config.cache.dir_mode, 0o750);
        assert_eq!(config.cache.write_mode, WriteMode::Exclusive);
        assert_eq!(config.download.timeout, 12);
        assert_eq!(config.download.user_agent, "app/1.0 (X11;Linux)");
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("0700 ; octal"), "0700");
        assert_eq!(strip_inline_comment("a;b#c"), "a;b#c");
        assert_eq!(strip_inline_comment("; only a comment"), "");
        assert_eq!(strip_inline_comment("C:\\tiles #x"), "C:\\tiles");
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("0700"), Some(0o700));
        assert_eq!(parse_mode("755"), Some(0o755));
        assert_eq!(parse_mode("0o2775"), Some(0o2775));
        assert_eq!(parse_mode("rwx"), None);
        assert_eq!(parse_mode(""), None);
        assert_eq!(parse_mode("077777"), None);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
