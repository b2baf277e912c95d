//! Dot-path configuration tree for the Scaffold CSS toolkit.
//!
//! This crate provides the [`ConfigStore`], a nested key-value tree addressed
//! by dot-joined key paths (`"cache.lifetime"`), and a loader that populates
//! it from a `scaffold.toml` file.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod store;
pub mod value;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use store::ConfigStore;
pub use value::ConfigValue;
