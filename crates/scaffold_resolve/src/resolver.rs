//! The include-path scanner and resolved-path memo.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use scaffold_cache::CacheStore;
use tracing::debug;

use crate::error::ResolveError;

/// Cache entry name under which the resolved-path memo is persisted.
const MEMO_ENTRY: &str = "find_file_paths";

/// Resolves logical resource names against an ordered list of search roots.
///
/// Roots are consulted in registration order and the first existing file
/// wins. Every resolution outcome, hit or miss, is memoized, and the
/// memo can be persisted across runs through a [`CacheStore`].
#[derive(Debug, Default)]
pub struct PathResolver {
    /// Search roots in priority order. Deduplicated, append-only per run.
    include_paths: Vec<PathBuf>,

    /// Memoized outcomes keyed by the composed `directory/filename` path.
    /// `None` records a miss so it is not re-scanned.
    memo: HashMap<String, Option<PathBuf>>,

    /// Set when the memo changed since it was last persisted.
    dirty: bool,
}

impl PathResolver {
    /// Creates a resolver with no search roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a search root, ignoring duplicates.
    pub fn add_include_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.include_paths.contains(&path) {
            self.include_paths.push(path);
        }
    }

    /// Removes a search root.
    pub fn remove_include_path(&mut self, path: &Path) {
        self.include_paths.retain(|p| p != path);
    }

    /// Returns the registered search roots in priority order.
    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    /// Resolves a filename within a logical directory.
    ///
    /// A filename that is directly readable as given (absolute or relative
    /// to the working directory) short-circuits the search. Otherwise the
    /// composed `directory/filename` is looked up in the memo, then
    /// searched across the include paths in registration order; the first
    /// existing file wins.
    ///
    /// A miss returns `Ok(None)` unless `required` is set, in which case it
    /// is an error. Misses are memoized too, so repeated lookups of an
    /// absent resource do not re-scan the roots.
    pub fn resolve(
        &mut self,
        filename: &str,
        directory: &str,
        required: bool,
    ) -> Result<Option<PathBuf>, ResolveError> {
        if Path::new(filename).is_file() {
            let found = PathBuf::from(filename);
            self.remember(filename.to_string(), Some(found.clone()));
            return Ok(Some(found));
        }

        let composed = if directory.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", directory.trim_end_matches('/'), filename)
        };

        if let Some(outcome) = self.memo.get(&composed) {
            return Ok(outcome.clone());
        }

        let mut found = None;
        for root in &self.include_paths {
            let candidate = root.join(&composed);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "resolved in search root");
                found = Some(candidate);
                break;
            }
        }

        if found.is_none() && required {
            return Err(ResolveError::NotFound { path: composed });
        }

        self.remember(composed, found.clone());
        Ok(found)
    }

    fn remember(&mut self, key: String, outcome: Option<PathBuf>) {
        self.memo.insert(key, outcome);
        self.dirty = true;
    }

    /// Lists files and directories under a logical directory across all
    /// search roots.
    ///
    /// Roots are merged in *reverse* registration order, so a
    /// later-registered root's entries are listed first and take precedence
    /// when root-relative names collide. Entries whose name starts with `.`
    /// or `-` are skipped. With `recursive` set, subdirectories are
    /// descended into.
    pub fn list_files(&self, directory: &str, recursive: bool) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        for root in self.include_paths.iter().rev() {
            let base = root.join(directory);
            Self::walk(&base, Path::new(""), recursive, &mut seen, &mut out);
        }
        out
    }

    fn walk(
        base: &Path,
        relative: &Path,
        recursive: bool,
        seen: &mut HashSet<PathBuf>,
        out: &mut Vec<PathBuf>,
    ) {
        let dir = base.join(relative);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return;
        };

        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let Some(name_str) = name.to_str() else {
                continue;
            };
            if name_str.starts_with('.') || name_str.starts_with('-') {
                continue;
            }

            let rel = relative.join(&name);
            let path = entry.path();
            // An earlier (higher-precedence) root already produced this name.
            if !seen.insert(rel.clone()) {
                continue;
            }
            out.push(path.clone());

            if recursive && path.is_dir() {
                Self::walk(base, &rel, true, seen, out);
            }
        }
    }

    /// Returns `true` if the memo changed since it was last persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Loads the resolved-path memo persisted by a previous run.
    ///
    /// Fail-safe: a missing, stale, or unreadable snapshot leaves the memo
    /// empty.
    pub fn load_state(&mut self, cache: &CacheStore, lifetime: i64) {
        let Some(payload) = cache.read(MEMO_ENTRY, lifetime) else {
            return;
        };
        if let Ok(memo) = serde_json::from_slice(&payload) {
            self.memo = memo;
            self.dirty = false;
        }
    }

    /// Persists the resolved-path memo if it changed this run.
    pub fn flush_state(&mut self, cache: &CacheStore) -> Result<(), scaffold_cache::CacheError> {
        if !self.dirty {
            return Ok(());
        }
        let payload =
            serde_json::to_vec(&self.memo).map_err(|e| scaffold_cache::CacheError::Serialization {
                reason: e.to_string(),
            })?;
        cache.write(MEMO_ENTRY, &payload)?;
        self.dirty = false;
        Ok(())
    }
}
