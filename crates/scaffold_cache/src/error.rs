//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Reads are fail-safe and never produce these; they are surfaced by
/// opening a store against a bad cache directory and by writes.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The configured cache directory is missing or not writable.
    #[error("cache path error at {path}: {reason}")]
    CachePath {
        /// The configured cache root.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// An I/O error occurred while writing a cache entry.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization or deserialization error occurred.
    #[error("cache serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
