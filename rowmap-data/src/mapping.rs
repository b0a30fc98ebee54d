//! Per-type registration of persisted fields.
//!
//! An [`EntityMapping`] is the declarative counterpart of field tags: each
//! registered field carries a [`FieldTag`] and a getter that reads its value
//! from an instance. Composed base types are flattened after the type's own
//! fields, which fixes the column order used in generated SQL.

use std::fmt;
use std::sync::Arc;

use crate::value::{SqlValue, ToSqlValue};

/// Default length hint for a column when none is declared.
pub const DEFAULT_COLUMN_LENGTH: u32 = 255;

/// Marks a field as the identifier (primary key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdTag {
    /// Explicit column name. Empty or absent means "fall through".
    pub name: Option<String>,
}

/// Marks a field as a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTag {
    /// Explicit column name. Empty or absent means the field name is used.
    pub name: Option<String>,
    pub nullable: bool,
    /// Length hint for text based columns.
    pub length: u32,
}

impl Default for ColumnTag {
    fn default() -> Self {
        Self {
            name: None,
            nullable: true,
            length: DEFAULT_COLUMN_LENGTH,
        }
    }
}

/// Persistence tags attached to one field.
///
/// A field with neither tag is registered but excluded from mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    pub id: Option<IdTag>,
    pub column: Option<ColumnTag>,
}

impl FieldTag {
    /// A field without persistence tags.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn id() -> Self {
        Self {
            id: Some(IdTag::default()),
            column: None,
        }
    }

    pub fn id_named(name: impl Into<String>) -> Self {
        Self {
            id: Some(IdTag {
                name: Some(name.into()),
            }),
            column: None,
        }
    }

    pub fn column() -> Self {
        Self {
            id: None,
            column: Some(ColumnTag::default()),
        }
    }

    pub fn column_named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            column: Some(ColumnTag {
                name: Some(name.into()),
                ..ColumnTag::default()
            }),
        }
    }

    /// Attach (or replace) the column tag, keeping any identifier tag.
    pub fn with_column(mut self, column: ColumnTag) -> Self {
        self.column = Some(column);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.column.get_or_insert_with(ColumnTag::default).nullable = nullable;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.column.get_or_insert_with(ColumnTag::default).length = length;
        self
    }

    pub fn is_identifier(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the field takes part in mapping at all.
    pub fn is_mapped(&self) -> bool {
        self.id.is_some() || self.column.is_some()
    }
}

pub(crate) type Accessor<E> = Arc<dyn Fn(&E) -> SqlValue + Send + Sync>;

/// One registered field: its logical name, tags, and getter.
pub struct FieldMapping<E> {
    path: String,
    tag: FieldTag,
    accessor: Accessor<E>,
}

impl<E> FieldMapping<E> {
    /// Logical field path. Embedded fields are prefixed with the embedding
    /// field (`audit.created_by`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The field's own name, without any embedding prefix.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }

    /// Read this field's value from an instance. Pure; never mutates `entity`.
    pub fn read(&self, entity: &E) -> SqlValue {
        (self.accessor)(entity)
    }
}

impl<E> Clone for FieldMapping<E> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            tag: self.tag.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<E> fmt::Debug for FieldMapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("path", &self.path)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Registration of a type's persisted shape.
pub struct EntityMapping<E> {
    type_name: String,
    is_entity: bool,
    table: Option<String>,
    fields: Vec<FieldMapping<E>>,
    inherited: Vec<FieldMapping<E>>,
}

impl<E: 'static> EntityMapping<E> {
    /// Start the mapping of a persistable entity whose simple name is `type_name`.
    ///
    /// Spell out the type (`EntityMapping::<Self>::entity(..)`): the getters
    /// passed to [`field`](Self::field) are typed against it.
    pub fn entity(type_name: impl Into<String>) -> Self {
        Self::new(type_name.into(), true)
    }

    /// Start the mapping of a base type meant to be embedded into entities.
    ///
    /// An embeddable is not itself an entity: resolving it directly fails.
    pub fn embeddable(type_name: impl Into<String>) -> Self {
        Self::new(type_name.into(), false)
    }

    fn new(type_name: String, is_entity: bool) -> Self {
        Self {
            type_name,
            is_entity,
            table: None,
            fields: Vec::new(),
            inherited: Vec::new(),
        }
    }

    /// Explicit table name. An empty name counts as "not given".
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Register a field with a reference getter, in declaration order.
    pub fn field<V>(self, tag: FieldTag, name: impl Into<String>, getter: fn(&E) -> &V) -> Self
    where
        V: ToSqlValue + ?Sized + 'static,
    {
        self.field_fn(tag, name, move |entity| getter(entity).to_sql_value())
    }

    /// Register a field whose value is computed by `read`.
    pub fn field_fn<F>(mut self, tag: FieldTag, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(&E) -> SqlValue + Send + Sync + 'static,
    {
        self.fields.push(FieldMapping {
            path: name.into(),
            tag,
            accessor: Arc::new(read),
        });
        self
    }

    /// Compose a base type's fields into this mapping.
    ///
    /// The base's flattened fields are placed after every field declared on
    /// this type, in embed order.
    pub fn embed<B: 'static>(
        mut self,
        name: impl Into<String>,
        project: fn(&E) -> &B,
        base: EntityMapping<B>,
    ) -> Self {
        let prefix = name.into();
        for field in base.into_fields() {
            let inner = field.accessor;
            self.inherited.push(FieldMapping {
                path: format!("{prefix}.{}", field.path),
                tag: field.tag,
                accessor: Arc::new(move |entity: &E| inner(project(entity))),
            });
        }
        self
    }

    /// The simple type name used when no table name is declared.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_entity(&self) -> bool {
        self.is_entity
    }

    pub fn explicit_table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// All registered fields, own fields first, then inherited ones.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMapping<E>> {
        self.fields.iter().chain(self.inherited.iter())
    }

    pub(crate) fn into_fields(self) -> Vec<FieldMapping<E>> {
        let mut fields = self.fields;
        fields.extend(self.inherited);
        fields
    }
}

impl<E> fmt::Debug for EntityMapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMapping")
            .field("type_name", &self.type_name)
            .field("is_entity", &self.is_entity)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .field("inherited", &self.inherited)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Audit {
        created_by: String,
    }

    struct Doc {
        id: i64,
        title: String,
        audit: Audit,
    }

    fn audit_mapping() -> EntityMapping<Audit> {
        EntityMapping::<Audit>::embeddable("Audit").field(FieldTag::column(), "created_by", |a| &a.created_by)
    }

    #[test]
    fn embedded_fields_follow_own_fields() {
        let mapping = EntityMapping::<Doc>::entity("Doc")
            .embed("audit", |d| &d.audit, audit_mapping())
            .field(FieldTag::id(), "id", |d| &d.id)
            .field(FieldTag::column(), "title", |d| &d.title);

        let paths: Vec<&str> = mapping.fields().map(FieldMapping::path).collect();
        assert_eq!(paths, vec!["id", "title", "audit.created_by"]);
    }

    #[test]
    fn embedded_getters_read_through_projection() {
        let mapping = EntityMapping::<Doc>::entity("Doc").embed("audit", |d| &d.audit, audit_mapping());
        let doc = Doc {
            id: 1,
            title: "t".into(),
            audit: Audit {
                created_by: "alice".into(),
            },
        };
        let field = mapping.fields().next().unwrap();
        assert_eq!(field.name(), "created_by");
        assert_eq!(field.read(&doc), SqlValue::Text("alice".into()));
    }

    #[test]
    fn tag_builders_compose() {
        let tag = FieldTag::id_named("doc_id").nullable(false).length(36);
        assert!(tag.is_identifier());
        let column = tag.column.unwrap();
        assert!(!column.nullable);
        assert_eq!(column.length, 36);
        assert!(!FieldTag::none().is_mapped());
        assert_eq!(FieldTag::column().column.unwrap().length, DEFAULT_COLUMN_LENGTH);
    }
}
