//! Configuration file loading.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::store::ConfigStore;
use crate::value::ConfigValue;

/// Loads a `scaffold.toml` configuration from a project directory.
///
/// Reads `<project_dir>/scaffold.toml` and converts it into a
/// [`ConfigStore`] tree.
pub fn load_config(project_dir: &Path) -> Result<ConfigStore, ConfigError> {
    let config_path = project_dir.join("scaffold.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses a configuration from a TOML string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ConfigStore, ConfigError> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let mut store = ConfigStore::new();
    store.merge(convert_table(table));
    Ok(store)
}

/// Converts a parsed TOML table into configuration tree nodes.
fn convert_table(table: toml::Table) -> BTreeMap<String, ConfigValue> {
    table
        .into_iter()
        .map(|(key, value)| (key, convert_value(value)))
        .collect()
}

fn convert_value(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Integer(i),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        // Dates have no tree representation; keep their display form.
        toml::Value::Datetime(d) => ConfigValue::String(d.to_string()),
        toml::Value::Array(items) => {
            ConfigValue::List(items.into_iter().map(convert_value).collect())
        }
        toml::Value::Table(table) => ConfigValue::Map(convert_table(table)),
    }
}
