//! The TTL-based cache store.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use scaffold_common::ContentHash;
use serde::Serialize;
use tracing::{debug, warn};

use crate::envelope;
use crate::error::CacheError;

/// Filename prefix for every cache entry.
const ENTRY_PREFIX: &str = "scaffold_";

/// A cache of named payloads persisted under a single cache root.
///
/// Entries live at `<cacheRoot>/scaffold_<name>` and are sealed in the
/// envelope defined in [`crate::envelope`]. The file modification time
/// doubles as the freshness clock: an entry older than the lifetime given
/// to [`read`](CacheStore::read) is deleted and treated as absent.
#[derive(Debug)]
pub struct CacheStore {
    /// Root directory for all cache entries.
    cache_root: PathBuf,

    /// Toolkit version recorded in every envelope.
    producer: String,
}

impl CacheStore {
    /// Opens a cache store rooted at the given directory.
    ///
    /// The directory must already exist and be writable; a missing or
    /// read-only cache path is a configuration error, not something the
    /// cache creates on its own.
    pub fn open(cache_root: &Path) -> Result<Self, CacheError> {
        if !cache_root.is_dir() {
            return Err(CacheError::CachePath {
                path: cache_root.to_path_buf(),
                reason: "directory does not exist".to_string(),
            });
        }

        // Probe writability up front so a bad mount fails the run early.
        let probe = cache_root.join(format!(".scaffold-probe-{}", std::process::id()));
        if let Err(e) = std::fs::write(&probe, b"") {
            return Err(CacheError::CachePath {
                path: cache_root.to_path_buf(),
                reason: format!("directory is not writable: {e}"),
            });
        }
        let _ = std::fs::remove_file(&probe);

        Ok(Self {
            cache_root: cache_root.to_path_buf(),
            producer: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Returns the cache root directory.
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Returns the file path for the entry with the given name.
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.cache_root.join(format!("{ENTRY_PREFIX}{name}"))
    }

    /// Creates a cache key by fingerprinting raw bytes.
    ///
    /// Identical input always yields the identical key.
    pub fn make_key(input: &[u8]) -> String {
        ContentHash::from_bytes(input).to_string()
    }

    /// Creates a cache key from a structured value.
    ///
    /// The value is serialized deterministically first, then fingerprinted.
    pub fn make_key_of<T: Serialize>(input: &T) -> Result<String, CacheError> {
        let bytes = serde_json::to_vec(input).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        Ok(Self::make_key(&bytes))
    }

    /// Reads the payload of a named entry, subject to a lifetime in seconds.
    ///
    /// Returns `None` when the lifetime is zero or negative, when the entry
    /// does not exist, or when its envelope fails validation. A stale entry
    /// (older than `lifetime`) is deleted and treated as absent, never
    /// served.
    pub fn read(&self, name: &str, lifetime: i64) -> Option<Vec<u8>> {
        if lifetime <= 0 {
            return None;
        }

        let path = self.entry_path(name);
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        if age.as_secs() >= lifetime as u64 {
            debug!(name, age_secs = age.as_secs(), "cache entry stale, deleting");
            let _ = std::fs::remove_file(&path);
            return None;
        }

        let raw = std::fs::read(&path).ok()?;
        match envelope::open(&raw) {
            Some(payload) => {
                debug!(name, bytes = payload.len(), "cache hit");
                Some(payload)
            }
            None => {
                warn!(name, "cache entry failed envelope validation, ignoring");
                None
            }
        }
    }

    /// Writes a payload under the given entry name.
    ///
    /// Intermediate directories under the cache root are created as needed.
    /// The entry is written to a temp file and renamed into place, so a
    /// concurrent reader sees either the old entry or the new one, never a
    /// torn write. The file is made world-writable and its modification
    /// time is fresh, so subsequent lifetime checks start from now.
    pub fn write(&self, name: &str, payload: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let sealed = envelope::seal(payload, &self.producer)?;

        let tmp = path.with_extension(format!("tmp-{}", std::process::id()));
        std::fs::write(&tmp, &sealed).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o666);
            std::fs::set_permissions(&tmp, perms).map_err(|e| CacheError::Io {
                path: tmp.clone(),
                source: e,
            })?;
        }

        std::fs::rename(&tmp, &path).map_err(|e| CacheError::Io { path, source: e })?;
        debug!(name, bytes = payload.len(), "cache entry written");
        Ok(())
    }

    /// Deletes every entry under the cache root.
    ///
    /// Only paths carrying the entry prefix are touched. A nested entry
    /// name (`sub/two`) puts the prefix on its first path segment, so
    /// everything below a prefixed directory is an entry too. Returns the
    /// number of entries removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        Self::clear_dir(&self.cache_root, false)
    }

    fn clear_dir(dir: &Path, inside_entry: bool) -> Result<usize, CacheError> {
        let mut removed = 0;
        let entries = std::fs::read_dir(dir).map_err(|e| CacheError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CacheError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let is_entry = inside_entry
                || entry
                    .file_name()
                    .to_str()
                    .is_some_and(|n| n.starts_with(ENTRY_PREFIX));
            let path = entry.path();
            if path.is_dir() {
                removed += Self::clear_dir(&path, is_entry)?;
                if is_entry {
                    let _ = std::fs::remove_dir(&path);
                }
            } else if is_entry {
                std::fs::remove_file(&path).map_err(|e| CacheError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
