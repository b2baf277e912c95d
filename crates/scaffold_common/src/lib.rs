//! Shared foundational types for the Scaffold CSS toolkit.
//!
//! This crate provides the content fingerprint used for cache keys and a
//! handful of path/name helpers shared by the resolver crates.

#![warn(missing_docs)]

pub mod hash;
pub mod path;

pub use hash::ContentHash;
pub use path::{is_css_name, normalize_slashes};
