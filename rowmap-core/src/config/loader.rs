use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load and parse a YAML file, flattening it into the values map.
///
/// A missing file is not an error: layered profiles are optional.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if path.exists() {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        load_yaml_str(&content, values)?;
    }
    Ok(())
}

/// Parse a YAML string and flatten it into the values map.
pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Flatten a YAML tree into dot-separated keys.
pub(crate) fn flatten_yaml(
    prefix: &str,
    value: &serde_yaml::Value,
    out: &mut HashMap<String, ConfigValue>,
) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key_str = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
            }
        }
    }
}

/// Map an environment variable name onto a config key.
///
/// Convention: `ROWMAP_DATA_CACHE` <-> `rowmap.data.cache`. Variables without
/// the `ROWMAP_` prefix are ignored.
pub(crate) fn env_key_to_config_key(env_key: &str) -> Option<String> {
    if !env_key.starts_with("ROWMAP_") {
        return None;
    }
    Some(env_key.to_lowercase().replace('_', "."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_mappings() {
        let mut values = HashMap::new();
        load_yaml_str("rowmap:\n  data:\n    cache: false\n", &mut values).unwrap();
        assert!(matches!(
            values.get("rowmap.data.cache"),
            Some(ConfigValue::Bool(false))
        ));
    }

    #[test]
    fn env_keys_require_prefix() {
        assert_eq!(
            env_key_to_config_key("ROWMAP_DATA_LOG_STATEMENTS").as_deref(),
            Some("rowmap.data.log.statements")
        );
        assert_eq!(env_key_to_config_key("HOME"), None);
    }
}
