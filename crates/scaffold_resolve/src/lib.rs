//! Resource path resolution across ordered search roots.
//!
//! This crate locates logical resource names by scanning an ordered list of
//! include paths, memoizing every outcome, and persisting the memo between
//! runs through the cache store.

#![warn(missing_docs)]

pub mod error;
pub mod resolver;

pub use error::ResolveError;
pub use resolver::PathResolver;
