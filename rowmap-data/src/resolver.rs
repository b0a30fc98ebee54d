//! Metadata resolution: turns an [`EntityMapping`] into an [`EntityDescriptor`].
//!
//! Rules, in priority order:
//! 1. table name = explicit table name if non-empty, else the simple type name;
//! 2. column name = identifier-tag name, else column-tag name, else the field name
//!    (empty names fall through);
//! 3. exactly one field across the flattened field set carries an identifier tag;
//! 4. untagged fields are skipped.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::config::DataConfig;
use crate::descriptor::{ColumnDescriptor, EntityDescriptor};
use crate::entity::Entity;
use crate::error::{DataError, DataResult};
use crate::mapping::{EntityMapping, FieldMapping, FieldTag, DEFAULT_COLUMN_LENGTH};

/// How resolved table and column names are checked beyond non-emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierPolicy {
    /// Accept any non-empty name.
    #[default]
    Raw,
    /// Every dot-separated segment must match `[A-Za-z_][A-Za-z0-9_]*`.
    Validate,
}

impl std::str::FromStr for IdentifierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(IdentifierPolicy::Raw),
            "validate" => Ok(IdentifierPolicy::Validate),
            other => Err(format!("unknown identifier policy '{other}' (expected raw or validate)")),
        }
    }
}

/// A descriptor together with the getters of its mapped fields.
///
/// `fields[i]` reads the value for `descriptor.columns()[i]`.
pub(crate) struct ResolvedEntity<E> {
    pub(crate) descriptor: EntityDescriptor,
    pub(crate) fields: Vec<FieldMapping<E>>,
}

impl<E> ResolvedEntity<E> {
    pub(crate) fn identifier_field(&self) -> &FieldMapping<E> {
        &self.fields[self.descriptor.identifier_index()]
    }
}

/// Resolves and optionally caches entity metadata.
///
/// The cache is keyed by `TypeId`, populated once per type, and never
/// invalidated: registrations are immutable for the life of the process.
/// Failed resolutions are not cached.
pub struct MetadataResolver {
    policy: IdentifierPolicy,
    cache: Option<DashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataResolver {
    /// Resolver with the `Raw` policy and caching enabled.
    pub fn new() -> Self {
        Self {
            policy: IdentifierPolicy::Raw,
            cache: Some(DashMap::new()),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        let resolver = Self::new().with_policy(config.identifier_policy);
        if config.cache {
            resolver
        } else {
            resolver.without_cache()
        }
    }

    /// Process-wide resolver with default settings.
    pub fn shared() -> &'static MetadataResolver {
        static SHARED: OnceLock<MetadataResolver> = OnceLock::new();
        SHARED.get_or_init(MetadataResolver::new)
    }

    pub fn with_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve from scratch on every call.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn policy(&self) -> IdentifierPolicy {
        self.policy
    }

    /// Number of types currently cached.
    pub fn cached_types(&self) -> usize {
        self.cache.as_ref().map_or(0, DashMap::len)
    }

    /// Describe entity type `E`.
    ///
    /// # Errors
    ///
    /// `DataError::Configuration` when `E` is not declared as an entity, has
    /// zero or several identifier fields, or resolves an empty, invalid or
    /// duplicate table/column name.
    pub fn describe<E: Entity>(&self) -> DataResult<EntityDescriptor> {
        Ok(self.resolve::<E>()?.descriptor.clone())
    }

    pub(crate) fn resolve<E: Entity>(&self) -> DataResult<Arc<ResolvedEntity<E>>> {
        let Some(cache) = &self.cache else {
            return resolve_mapping(E::mapping(), self.policy).map(Arc::new);
        };

        let key = TypeId::of::<E>();
        if let Some(hit) = cache.get(&key) {
            if let Ok(resolved) = Arc::clone(hit.value()).downcast::<ResolvedEntity<E>>() {
                tracing::trace!(entity = %resolved.descriptor.type_name, "entity metadata cache hit");
                return Ok(resolved);
            }
        }

        let fresh: Arc<dyn Any + Send + Sync> = Arc::new(resolve_mapping(E::mapping(), self.policy)?);
        // First population wins; later resolutions of the same type reuse it.
        let stored = Arc::clone(cache.entry(key).or_insert(fresh).value());
        stored.downcast::<ResolvedEntity<E>>().map_err(|_| {
            DataError::Configuration(format!(
                "cached metadata for {} has an unexpected type",
                std::any::type_name::<E>()
            ))
        })
    }
}

/// Describe entity type `E` with the process-wide resolver.
pub fn describe<E: Entity>() -> DataResult<EntityDescriptor> {
    MetadataResolver::shared().describe::<E>()
}

pub(crate) fn resolve_mapping<E: 'static>(
    mapping: EntityMapping<E>,
    policy: IdentifierPolicy,
) -> DataResult<ResolvedEntity<E>> {
    let type_name = mapping.type_name().to_string();
    if !mapping.is_entity() {
        return Err(DataError::Configuration(format!(
            "Type {type_name} is not declared as an entity"
        )));
    }

    let table_name = match mapping.explicit_table() {
        Some(table) if !table.is_empty() => table.to_string(),
        _ => type_name.clone(),
    };
    check_name(policy, "table", &table_name, &type_name)?;

    let fields = mapping.into_fields();
    let identifiers = fields.iter().filter(|f| f.tag().is_identifier()).count();
    match identifiers {
        0 => {
            return Err(DataError::Configuration(format!(
                "No identifier field found in {type_name}"
            )))
        }
        1 => {}
        n => {
            return Err(DataError::Configuration(format!(
                "Multiple identifier fields found in {type_name} ({n})"
            )))
        }
    }

    let mut columns = Vec::new();
    let mut mapped = Vec::new();
    let mut identifier = 0;
    let mut seen: HashMap<String, String> = HashMap::new();

    for field in fields.into_iter().filter(|f| f.tag().is_mapped()) {
        let column = resolve_column_name(field.name(), field.tag());
        check_name(policy, "column", &column, &type_name)?;
        if let Some(previous) = seen.insert(column.clone(), field.path().to_string()) {
            return Err(DataError::Configuration(format!(
                "Column {column} is mapped by both {previous} and {} in {type_name}",
                field.path()
            )));
        }

        let tag = field.tag();
        if tag.is_identifier() {
            identifier = columns.len();
        }
        columns.push(ColumnDescriptor {
            field: field.path().to_string(),
            column,
            identifier: tag.is_identifier(),
            nullable: !tag.is_identifier() && tag.column.as_ref().map_or(true, |c| c.nullable),
            length: tag
                .column
                .as_ref()
                .map_or(DEFAULT_COLUMN_LENGTH, |c| c.length),
        });
        mapped.push(field);
    }

    tracing::debug!(
        entity = %type_name,
        table = %table_name,
        columns = columns.len(),
        "resolved entity metadata"
    );

    Ok(ResolvedEntity {
        descriptor: EntityDescriptor {
            type_name,
            table_name,
            columns,
            identifier,
        },
        fields: mapped,
    })
}

/// Column name for a field: identifier-tag name, then column-tag name, then
/// the field's own name. Empty explicit names fall through.
pub(crate) fn resolve_column_name(field_name: &str, tag: &FieldTag) -> String {
    let explicit_id = tag.id.as_ref().and_then(|id| id.name.as_deref());
    let explicit_column = tag.column.as_ref().and_then(|c| c.name.as_deref());
    [explicit_id, explicit_column]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(field_name)
        .to_string()
}

fn check_name(
    policy: IdentifierPolicy,
    kind: &'static str,
    name: &str,
    type_name: &str,
) -> DataResult<()> {
    if name.is_empty() {
        return Err(DataError::Configuration(format!(
            "Empty {kind} name resolved for {type_name}"
        )));
    }
    if policy == IdentifierPolicy::Validate && !is_valid_identifier(name) {
        return Err(DataError::Configuration(format!(
            "Invalid {kind} identifier '{name}' in {type_name}"
        )));
    }
    Ok(())
}

fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty() && ident.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_name_priority() {
        assert_eq!(resolve_column_name("id", &FieldTag::id()), "id");
        assert_eq!(resolve_column_name("id", &FieldTag::id_named("user_id")), "user_id");
        assert_eq!(resolve_column_name("name", &FieldTag::column_named("full_name")), "full_name");

        let both = FieldTag::id_named("pk").with_column(crate::mapping::ColumnTag {
            name: Some("ignored".into()),
            ..Default::default()
        });
        assert_eq!(resolve_column_name("id", &both), "pk");

        let empty_id = FieldTag::id_named("").with_column(crate::mapping::ColumnTag {
            name: Some("code".into()),
            ..Default::default()
        });
        assert_eq!(resolve_column_name("id", &empty_id), "code");
        assert_eq!(resolve_column_name("name", &FieldTag::column_named("")), "name");
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("users"));
        assert!(is_valid_identifier("app.users"));
        assert!(is_valid_identifier("_tmp1"));
        assert!(!is_valid_identifier("users;drop"));
        assert!(!is_valid_identifier("1users"));
        assert!(!is_valid_identifier("app..users"));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Validate".parse::<IdentifierPolicy>(), Ok(IdentifierPolicy::Validate));
        assert_eq!("raw".parse::<IdentifierPolicy>(), Ok(IdentifierPolicy::Raw));
        assert!("quote".parse::<IdentifierPolicy>().is_err());
    }
}
