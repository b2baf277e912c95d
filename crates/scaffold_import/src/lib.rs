//! Recursive `@include` inlining for CSS buffers.
//!
//! This crate finds `@include '<path>';` directives in a stylesheet and
//! replaces each with the raw contents of the referenced file, expanding
//! nested imports depth-first. Cycles, non-CSS targets, and missing files
//! are hard errors; a file referenced more than once is inlined exactly
//! once, at its first point of reference.

#![warn(missing_docs)]

pub mod directive;
pub mod error;
pub mod resolver;

pub use directive::{find_directive, Directive};
pub use error::ImportError;
pub use resolver::ImportResolver;
