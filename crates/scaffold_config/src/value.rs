//! The tagged configuration value tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in the configuration tree: either a leaf scalar, a list, or a
/// map of named child nodes.
///
/// The tree is dynamically shaped: the same dot path may hold a leaf in
/// one run and a map in another. [`ConfigStore::set`](crate::ConfigStore::set)
/// converts a leaf into a map node when a path continues past it; that
/// coercion discards the leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean leaf.
    Bool(bool),
    /// An integer leaf.
    Integer(i64),
    /// A floating-point leaf.
    Float(f64),
    /// A string leaf.
    String(String),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A map node with named children.
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns an empty map node.
    pub fn empty_map() -> Self {
        ConfigValue::Map(BTreeMap::new())
    }

    /// Returns the string slice if this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an integer leaf.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a boolean leaf.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the child map if this is a map node.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns `true` if this node is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, ConfigValue::Map(_))
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::String(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Integer(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(ConfigValue::from("x"), ConfigValue::String("x".to_string()));
        assert_eq!(ConfigValue::from(3i64), ConfigValue::Integer(3));
        assert_eq!(ConfigValue::from(true), ConfigValue::Bool(true));
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(ConfigValue::from("x").as_str(), Some("x"));
        assert_eq!(ConfigValue::from("x").as_integer(), None);
        assert_eq!(ConfigValue::from(7i64).as_integer(), Some(7));
        assert_eq!(ConfigValue::from(false).as_bool(), Some(false));
        assert!(ConfigValue::empty_map().as_map().unwrap().is_empty());
    }

    #[test]
    fn is_map_only_for_maps() {
        assert!(ConfigValue::empty_map().is_map());
        assert!(!ConfigValue::from(1i64).is_map());
        assert!(!ConfigValue::List(vec![]).is_map());
    }

    #[test]
    fn serde_untagged_roundtrip() {
        let mut m = BTreeMap::new();
        m.insert("lifetime".to_string(), ConfigValue::Integer(3600));
        let v = ConfigValue::Map(m);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"lifetime":3600}"#);
        let back: ConfigValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
