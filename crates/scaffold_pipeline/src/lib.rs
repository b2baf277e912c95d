//! The staged CSS compilation pipeline.
//!
//! This crate ties the import resolver, config store, path resolver, and
//! cache store together: a [`Pipeline`] runs a source buffer through five
//! fixed stages, invoking every registered [`Module`] hook in registration
//! order, and memoizes the final text in the cache keyed by a content
//! fingerprint.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod module;
pub mod pipeline;

pub use context::Context;
pub use error::PipelineError;
pub use module::{Module, Stage};
pub use pipeline::{Pipeline, Source};
