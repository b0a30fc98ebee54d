use rowmap_core::config::{ConfigError, RowmapConfig};

use crate::resolver::IdentifierPolicy;

/// Data-layer settings read from the `rowmap.data` section.
///
/// ```yaml
/// rowmap:
///   data:
///     identifiers: validate   # raw | validate
///     cache: true
///     log:
///       statements: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub identifier_policy: IdentifierPolicy,
    /// Cache resolved metadata per type.
    pub cache: bool,
    /// Log dispatched statements at `INFO` instead of `DEBUG`.
    pub log_statements: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            identifier_policy: IdentifierPolicy::Raw,
            cache: true,
            log_statements: false,
        }
    }
}

impl DataConfig {
    pub const PREFIX: &'static str = "rowmap.data";

    pub fn from_config(config: &RowmapConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let policy_key = format!("{}.identifiers", Self::PREFIX);
        let identifier_policy = match config.get::<Option<String>>(&policy_key) {
            Ok(Some(raw)) => raw.parse().map_err(|_| ConfigError::TypeMismatch {
                key: policy_key.clone(),
                expected: "raw | validate",
            })?,
            Ok(None) | Err(ConfigError::NotFound(_)) => defaults.identifier_policy,
            Err(e) => return Err(e),
        };

        Ok(Self {
            identifier_policy,
            cache: config.get_or(&format!("{}.cache", Self::PREFIX), defaults.cache)?,
            log_statements: config.get_or(
                &format!("{}.log.statements", Self::PREFIX),
                defaults.log_statements,
            )?,
        })
    }
}
