//! Init command - write the configuration file.

use std::path::Path;

use tilecache::config::ConfigFile;

use crate::error::CliError;

/// Run the init command.
///
/// Writes defaults to `path` unless the file exists. With `force`, an
/// existing valid file is rewritten with its values kept; a file with any
/// invalid value is replaced by defaults.
pub fn run(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to rewrite it with the current defaults.");
        return Ok(());
    }

    let config = match ConfigFile::load_from(path) {
        Ok(config) => config,
        Err(e) => {
            println!("Existing file is invalid ({}), writing defaults.", e);
            ConfigFile::default()
        }
    };
    config.save_to(path)?;

    println!("Configuration file: {}", path.display());
    println!("Cache directory:    {}", config.cache.directory.display());
    println!();
    println!("Edit this file to customize tilecache settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tilecache").join("config.ini");

        run(&path, false).unwrap();

        assert!(path.is_file());
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[download]\nparallel = 3\n").unwrap();

        run(&path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[download]\nparallel = 3\n");
    }

    #[test]
    fn test_init_force_keeps_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[download]\nparallel = 3\n").unwrap();

        run(&path, true).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.download.parallel, 3);
        assert!(std::fs::read_to_string(&path).unwrap().contains("[cache]"));
    }

    #[test]
    fn test_init_force_replaces_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[download]\nparallel = 3\ntimeout = soon\n").unwrap();

        run(&path, true).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }
}
