//! TTL-based on-disk cache for compiled stylesheets and process state.
//!
//! This crate persists named payloads under `<cacheRoot>/scaffold_<name>`,
//! sealed in a validated binary envelope. Entries older than their lifetime
//! are treated as absent and deleted on the next read. All reads are
//! fail-safe: corruption or version mismatches result in cache misses
//! rather than errors.

#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod store;

pub use error::CacheError;
pub use store::CacheStore;
