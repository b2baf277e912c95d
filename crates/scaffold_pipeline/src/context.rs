//! The per-run compile context.

use std::collections::BTreeSet;
use std::path::PathBuf;

use scaffold_cache::{CacheError, CacheStore};
use scaffold_config::ConfigStore;
use scaffold_resolve::PathResolver;

/// Cache entry name under which flags are persisted.
const FLAGS_ENTRY: &str = "flags";

/// Cache lifetime applied when `cache.lifetime` is not configured.
const DEFAULT_LIFETIME: i64 = 3600;

/// Everything a compile run needs, constructed once per run and passed by
/// reference into the pipeline and every module hook.
///
/// There are no global singletons: each context owns its own config tree,
/// path resolver, and cache handle, which keeps runs isolated and
/// testable. Components own their internal state; nothing here reaches
/// into another component directly.
pub struct Context {
    /// The configuration tree.
    pub config: ConfigStore,

    /// The include-path resolver.
    pub resolver: PathResolver,

    /// The on-disk cache.
    pub cache: CacheStore,

    /// Flags set by modules during this run, persisted across runs.
    flags: BTreeSet<String>,

    /// Set when a flag was added since the flags were last persisted.
    flags_dirty: bool,

    /// Run-scoped options, not persisted.
    options: BTreeSet<String>,
}

impl Context {
    /// Creates a context from its three components.
    pub fn new(config: ConfigStore, resolver: PathResolver, cache: CacheStore) -> Self {
        Self {
            config,
            resolver,
            cache,
            flags: BTreeSet::new(),
            flags_dirty: false,
            options: BTreeSet::new(),
        }
    }

    /// Returns the configured document root (`core.path.docroot`),
    /// defaulting to `/`.
    pub fn doc_root(&self) -> PathBuf {
        self.config
            .get_dir("core.path.docroot")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    /// Returns the configured cache lifetime in seconds
    /// (`cache.lifetime`), defaulting to one hour.
    pub fn cache_lifetime(&self) -> i64 {
        self.config
            .get("cache.lifetime")
            .and_then(|v| v.as_integer())
            .unwrap_or(DEFAULT_LIFETIME)
    }

    /// Sets a named flag.
    pub fn set_flag(&mut self, name: impl Into<String>) {
        if self.flags.insert(name.into()) {
            self.flags_dirty = true;
        }
    }

    /// Returns `true` if the named flag is set.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Sets a named option for this run only.
    pub fn set_option(&mut self, name: impl Into<String>) {
        self.options.insert(name.into());
    }

    /// Returns `true` if the named option is set.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    /// Loads state persisted by a previous run: the resolver memo and the
    /// flag set. Fail-safe; missing or stale snapshots leave the state
    /// empty.
    pub fn load_state(&mut self) {
        let lifetime = self.cache_lifetime();
        self.resolver.load_state(&self.cache, lifetime);
        if let Some(payload) = self.cache.read(FLAGS_ENTRY, lifetime) {
            if let Ok(flags) = serde_json::from_slice(&payload) {
                self.flags = flags;
                self.flags_dirty = false;
            }
        }
    }

    /// Persists state that changed this run.
    ///
    /// Called at end-of-run; only dirty parts are written.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        self.resolver.flush_state(&self.cache)?;
        if self.flags_dirty {
            let payload =
                serde_json::to_vec(&self.flags).map_err(|e| CacheError::Serialization {
                    reason: e.to_string(),
                })?;
            self.cache.write(FLAGS_ENTRY, &payload)?;
            self.flags_dirty = false;
        }
        Ok(())
    }
}
