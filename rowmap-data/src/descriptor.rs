use serde::Serialize;

/// Resolved mapping of one persisted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Logical field path (`name`, or `audit.created_by` for embedded fields).
    pub field: String,
    pub column: String,
    pub identifier: bool,
    pub nullable: bool,
    pub length: u32,
}

/// Table name, ordered columns and identifier of an entity type.
///
/// Derived fresh from the type's registration (or read from the resolver
/// cache); never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    pub(crate) type_name: String,
    pub(crate) table_name: String,
    pub(crate) columns: Vec<ColumnDescriptor>,
    #[serde(skip)]
    pub(crate) identifier: usize,
}

impl EntityDescriptor {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Mapped columns in SQL order: own fields first, then embedded ones.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn identifier(&self) -> &ColumnDescriptor {
        &self.columns[self.identifier]
    }

    pub fn id_column(&self) -> &str {
        &self.identifier().column
    }

    pub(crate) fn identifier_index(&self) -> usize {
        self.identifier
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    /// Column name mapped to a logical field path, if the field is mapped.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.column.as_str())
    }
}
