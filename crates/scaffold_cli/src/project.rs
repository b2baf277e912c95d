//! Shared project loading helpers for the CLI commands.

use std::path::{Path, PathBuf};

use scaffold_cache::CacheStore;
use scaffold_config::{load_config_from_str, ConfigStore, ConfigValue};
use tracing::debug;

use crate::GlobalArgs;

/// Loads the project configuration.
///
/// An explicit `--config` path must exist and parse. Otherwise
/// `scaffold.toml` in the current directory is used if present; a project
/// without one gets an empty configuration tree.
pub fn load_project_config(global: &GlobalArgs) -> Result<ConfigStore, Box<dyn std::error::Error>> {
    let path = match &global.config {
        Some(path) => PathBuf::from(path),
        None => {
            let default = PathBuf::from("scaffold.toml");
            if !default.is_file() {
                debug!("no scaffold.toml found, using empty configuration");
                return Ok(ConfigStore::new());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let config = load_config_from_str(&content)?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Opens the cache store for a project.
///
/// The directory comes from the `--cache-dir` override, then `cache.path`
/// in the config, then `scaffold` under the system temp directory. It is
/// created if missing.
pub fn open_cache_store(
    config: &ConfigStore,
    cache_dir: Option<&str>,
) -> Result<CacheStore, Box<dyn std::error::Error>> {
    let dir = match cache_dir {
        Some(dir) => PathBuf::from(dir),
        None => match config.get("cache.path").and_then(ConfigValue::as_str) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::temp_dir().join("scaffold"),
        },
    };

    std::fs::create_dir_all(&dir)?;
    Ok(CacheStore::open(&dir)?)
}

/// Returns the include paths configured under `core.include_paths`.
pub fn config_include_paths(config: &ConfigStore) -> Vec<PathBuf> {
    let Some(ConfigValue::List(items)) = config.get("core.include_paths") else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(ConfigValue::as_str)
        .map(PathBuf::from)
        .collect()
}

/// Writes compiled CSS to the output path, or stdout when there is none.
pub fn emit_output(css: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, css)?;
        }
        None => println!("{css}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_default_config_is_empty() {
        let global = GlobalArgs {
            quiet: true,
            config: None,
        };
        // Running from the crate root where no scaffold.toml exists.
        let config = load_project_config(&global).unwrap();
        assert!(config.root().is_empty());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scaffold.toml");
        fs::write(&path, "[cache]\nlifetime = 60\n").unwrap();

        let global = GlobalArgs {
            quiet: true,
            config: Some(path.to_str().unwrap().to_string()),
        };
        let config = load_project_config(&global).unwrap();
        assert_eq!(config.get("cache.lifetime").unwrap().as_integer(), Some(60));
    }

    #[test]
    fn explicit_missing_config_errors() {
        let global = GlobalArgs {
            quiet: true,
            config: Some("/nonexistent/scaffold.toml".to_string()),
        };
        assert!(load_project_config(&global).is_err());
    }

    #[test]
    fn cache_dir_override_wins() {
        let dir = TempDir::new().unwrap();
        let override_dir = dir.path().join("cache");
        let mut config = ConfigStore::new();
        config.set("cache.path", dir.path().join("other").to_str().unwrap());

        let store =
            open_cache_store(&config, Some(override_dir.to_str().unwrap())).unwrap();
        assert_eq!(store.cache_root(), override_dir);
    }

    #[test]
    fn cache_dir_from_config() {
        let dir = TempDir::new().unwrap();
        let configured = dir.path().join("from-config");
        let mut config = ConfigStore::new();
        config.set("cache.path", configured.to_str().unwrap());

        let store = open_cache_store(&config, None).unwrap();
        assert_eq!(store.cache_root(), configured);
        assert!(configured.is_dir());
    }

    #[test]
    fn include_paths_from_config() {
        let config =
            scaffold_config::load_config_from_str("[core]\ninclude_paths = [\"/a\", \"/b\"]\n")
                .unwrap();
        assert_eq!(
            config_include_paths(&config),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn include_paths_absent_is_empty() {
        assert!(config_include_paths(&ConfigStore::new()).is_empty());
    }

    #[test]
    fn emit_output_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out.css");
        emit_output("a{}", Some(out.to_str().unwrap())).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "a{}");
    }
}
