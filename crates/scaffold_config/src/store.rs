//! The dot-path configuration store.

use std::collections::BTreeMap;

use scaffold_common::path::ensure_trailing_slash;
use serde::{Deserialize, Serialize};

use crate::value::ConfigValue;

/// A nested key-value tree addressed by dot-joined key paths.
///
/// Keys like `"cache.lifetime"` are split on `.` and walked segment by
/// segment. The first path segment is conventionally a group name
/// (`cache`, `core`, ...). `get` never touches the filesystem and `set`
/// creates intermediate map nodes on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigStore {
    root: BTreeMap<String, ConfigValue>,
}

impl ConfigStore {
    /// Creates an empty configuration store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value at a dot-joined key path.
    ///
    /// Walks the tree segment by segment and returns the first leaf
    /// reached, even if path segments remain past it. Returns `None` when
    /// a segment is missing.
    pub fn get(&self, key_path: &str) -> Option<&ConfigValue> {
        let mut segments = key_path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                ConfigValue::Map(children) => node = children.get(segment)?,
                // A leaf ends the walk; remaining segments are ignored.
                _ => return Some(node),
            }
        }
        Some(node)
    }

    /// Returns a string value with a trailing `/` forced onto it.
    ///
    /// Used for directory-valued settings (`core.path.docroot`, cache
    /// roots). Returns `None` if the path is missing or not a string leaf;
    /// an empty string is returned unchanged.
    pub fn get_dir(&self, key_path: &str) -> Option<String> {
        let value = self.get(key_path)?.as_str()?;
        Some(ensure_trailing_slash(value))
    }

    /// Sets the value at a dot-joined key path.
    ///
    /// Missing intermediate segments become map nodes. If an intermediate
    /// segment currently holds a leaf, the leaf is coerced into an empty
    /// map node and its value is lost.
    pub fn set(&mut self, key_path: &str, value: impl Into<ConfigValue>) {
        if key_path.is_empty() {
            return;
        }
        let segments: Vec<&str> = key_path.split('.').collect();
        let (last, parents) = match segments.split_last() {
            Some(parts) => parts,
            None => return,
        };

        let mut node = &mut self.root;
        for segment in parents {
            let slot = node
                .entry(segment.to_string())
                .or_insert_with(ConfigValue::empty_map);
            if !slot.is_map() {
                // Leaf-to-map coercion: the path continues past a leaf.
                *slot = ConfigValue::empty_map();
            }
            let ConfigValue::Map(children) = slot else {
                return;
            };
            node = children;
        }
        node.insert(last.to_string(), value.into());
    }

    /// Bulk-sets a sequence of `(key path, value)` pairs.
    pub fn set_many<I, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, V)>,
        V: Into<ConfigValue>,
    {
        for (key_path, value) in pairs {
            self.set(&key_path, value);
        }
    }

    /// Deep-merges another tree into this one.
    ///
    /// Map nodes are merged recursively; any other collision is resolved
    /// in favor of the incoming value.
    pub fn merge(&mut self, other: BTreeMap<String, ConfigValue>) {
        Self::merge_into(&mut self.root, other);
    }

    fn merge_into(dst: &mut BTreeMap<String, ConfigValue>, src: BTreeMap<String, ConfigValue>) {
        for (key, value) in src {
            match value {
                ConfigValue::Map(children) => {
                    let slot = dst.entry(key).or_insert_with(ConfigValue::empty_map);
                    if !slot.is_map() {
                        *slot = ConfigValue::empty_map();
                    }
                    if let ConfigValue::Map(existing) = slot {
                        Self::merge_into(existing, children);
                    }
                }
                leaf => {
                    dst.insert(key, leaf);
                }
            }
        }
    }

    /// Returns the root map of the tree.
    pub fn root(&self) -> &BTreeMap<String, ConfigValue> {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_leaf() {
        let mut config = ConfigStore::new();
        config.set("a.b.c", 1i64);
        assert_eq!(config.get("a.b.c"), Some(&ConfigValue::Integer(1)));
    }

    #[test]
    fn get_intermediate_map() {
        let mut config = ConfigStore::new();
        config.set("a.b.c", 1i64);
        let map = config.get("a.b").unwrap().as_map().unwrap();
        assert_eq!(map.get("c"), Some(&ConfigValue::Integer(1)));
    }

    #[test]
    fn get_missing_segment_is_absent() {
        let mut config = ConfigStore::new();
        config.set("a.b", "x");
        assert!(config.get("a.c").is_none());
        assert!(config.get("z").is_none());
    }

    #[test]
    fn get_stops_at_first_leaf() {
        let mut config = ConfigStore::new();
        config.set("a.b", 5i64);
        // Walking past a leaf returns the leaf, not absent.
        assert_eq!(config.get("a.b.c"), Some(&ConfigValue::Integer(5)));
    }

    #[test]
    fn set_coerces_leaf_to_map() {
        let mut config = ConfigStore::new();
        config.set("a.b", "leaf");
        config.set("a.b.c", 2i64);
        assert_eq!(config.get("a.b.c"), Some(&ConfigValue::Integer(2)));
        // The old leaf value is gone.
        assert!(config.get("a.b").unwrap().is_map());
    }

    #[test]
    fn set_overwrites_existing_leaf() {
        let mut config = ConfigStore::new();
        config.set("cache.lifetime", 3600i64);
        config.set("cache.lifetime", 60i64);
        assert_eq!(
            config.get("cache.lifetime").unwrap().as_integer(),
            Some(60)
        );
    }

    #[test]
    fn set_empty_key_is_a_no_op() {
        let mut config = ConfigStore::new();
        config.set("", 1i64);
        assert!(config.root().is_empty());
    }

    #[test]
    fn get_dir_forces_trailing_slash() {
        let mut config = ConfigStore::new();
        config.set("core.path.docroot", "/var/www");
        assert_eq!(config.get_dir("core.path.docroot").as_deref(), Some("/var/www/"));
    }

    #[test]
    fn get_dir_preserves_existing_slash() {
        let mut config = ConfigStore::new();
        config.set("core.path.docroot", "/var/www/");
        assert_eq!(config.get_dir("core.path.docroot").as_deref(), Some("/var/www/"));
    }

    #[test]
    fn get_dir_non_string_is_absent() {
        let mut config = ConfigStore::new();
        config.set("cache.lifetime", 3600i64);
        assert!(config.get_dir("cache.lifetime").is_none());
    }

    #[test]
    fn get_dir_empty_string_unchanged() {
        let mut config = ConfigStore::new();
        config.set("core.path.docroot", "");
        assert_eq!(config.get_dir("core.path.docroot").as_deref(), Some(""));
    }

    #[test]
    fn set_many_applies_all_pairs() {
        let mut config = ConfigStore::new();
        config.set_many([
            ("cache.lifetime".to_string(), ConfigValue::Integer(3600)),
            ("core.path.docroot".to_string(), ConfigValue::from("/www")),
        ]);
        assert_eq!(config.get("cache.lifetime").unwrap().as_integer(), Some(3600));
        assert_eq!(config.get("core.path.docroot").unwrap().as_str(), Some("/www"));
    }

    #[test]
    fn merge_combines_map_nodes() {
        let mut config = ConfigStore::new();
        config.set("cache.lifetime", 3600i64);

        let mut incoming = BTreeMap::new();
        let mut cache = BTreeMap::new();
        cache.insert("path".to_string(), ConfigValue::from("/tmp/cache"));
        incoming.insert("cache".to_string(), ConfigValue::Map(cache));
        config.merge(incoming);

        assert_eq!(config.get("cache.lifetime").unwrap().as_integer(), Some(3600));
        assert_eq!(config.get("cache.path").unwrap().as_str(), Some("/tmp/cache"));
    }

    #[test]
    fn merge_incoming_leaf_wins() {
        let mut config = ConfigStore::new();
        config.set("cache.lifetime", 3600i64);

        let mut incoming = BTreeMap::new();
        let mut cache = BTreeMap::new();
        cache.insert("lifetime".to_string(), ConfigValue::Integer(60));
        incoming.insert("cache".to_string(), ConfigValue::Map(cache));
        config.merge(incoming);

        assert_eq!(config.get("cache.lifetime").unwrap().as_integer(), Some(60));
    }

    #[test]
    fn serde_roundtrip() {
        let mut config = ConfigStore::new();
        config.set("a.b", 1i64);
        config.set("a.c", "two");
        let json = serde_json::to_string(&config).unwrap();
        let back: ConfigStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
