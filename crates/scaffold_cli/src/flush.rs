//! `scaffold flush` — clear the on-disk cache.

use crate::project::{load_project_config, open_cache_store};
use crate::{FlushArgs, GlobalArgs};

/// Runs the `scaffold flush` command.
///
/// Deletes every cache entry under the resolved cache root and reports how
/// many were removed.
pub fn run(args: &FlushArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project_config(global)?;
    let cache = open_cache_store(&config, args.cache_dir.as_deref())?;

    let removed = cache.clear()?;
    if !global.quiet {
        eprintln!("   Flushed {removed} cache entries");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_cache::CacheStore;
    use tempfile::TempDir;

    #[test]
    fn flush_removes_entries() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        store.write("one", b"1").unwrap();
        store.write("two", b"2").unwrap();

        let args = FlushArgs {
            cache_dir: Some(dir.path().to_str().unwrap().to_string()),
        };
        let global = GlobalArgs {
            quiet: true,
            config: None,
        };

        assert_eq!(run(&args, &global).unwrap(), 0);
        assert!(store.read("one", 3600).is_none());
        assert!(store.read("two", 3600).is_none());
    }

    #[test]
    fn flush_empty_cache_is_ok() {
        let dir = TempDir::new().unwrap();
        let args = FlushArgs {
            cache_dir: Some(dir.path().to_str().unwrap().to_string()),
        };
        let global = GlobalArgs {
            quiet: true,
            config: None,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }
}
