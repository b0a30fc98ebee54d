//! SQL synthesis for single-table CRUD by primary key.
//!
//! Every statement uses `?` placeholders and carries its parameters in
//! placeholder order: the Nth `?` binds the Nth parameter.

use std::marker::PhantomData;

use serde::Serialize;

use crate::entity::Entity;
use crate::error::{DataError, DataResult};
use crate::resolver::{MetadataResolver, ResolvedEntity};
use crate::value::{display_params, SqlValue, ToSqlValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
}

/// SQL text plus its ordered parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// The parameter list rendered for logs: `[1, Alice]`.
    pub fn params_display(&self) -> String {
        display_params(&self.params)
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Column name to value pairs extracted from one instance, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnValues {
    entries: Vec<(String, SqlValue)>,
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(column, _)| column.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Drop one column, keeping the order of the rest.
    pub fn without(mut self, column: &str) -> Self {
        self.entries.retain(|(name, _)| name != column);
        self
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

/// Builds the four canonical statements for entity type `E`.
///
/// Holds no state besides the resolver it borrows; every call validates the
/// type, reads the instance, and returns a fresh [`Statement`].
pub struct StatementBuilder<'r, E> {
    resolver: &'r MetadataResolver,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for StatementBuilder<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for StatementBuilder<'_, E> {}

impl<E: Entity> StatementBuilder<'static, E> {
    /// Builder backed by the process-wide resolver.
    pub fn shared() -> Self {
        Self::new(MetadataResolver::shared())
    }
}

impl<'r, E: Entity> StatementBuilder<'r, E> {
    pub fn new(resolver: &'r MetadataResolver) -> Self {
        Self {
            resolver,
            _marker: PhantomData,
        }
    }

    /// `INSERT INTO <table> (<cols>) VALUES (?, ...);` with every mapped
    /// column, identifier included.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a missing entity, `Configuration` for a malformed
    /// type, `Mapping` when no column is mapped.
    pub fn save(&self, entity: Option<&E>) -> DataResult<Statement> {
        let entity = require_entity(entity)?;
        let resolved = self.resolver.resolve::<E>()?;
        let values = column_values(&resolved, entity);
        if values.is_empty() {
            return Err(DataError::Mapping(format!(
                "No columns mapped for entity {}",
                resolved.descriptor.type_name()
            )));
        }

        let columns: Vec<&str> = values.columns().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            resolved.descriptor.table_name(),
            columns.join(", ")
        );
        Ok(Statement {
            kind: StatementKind::Insert,
            sql,
            params: values.into_values(),
        })
    }

    /// `SELECT * FROM <table> WHERE <id> = ?;` with `[id]`.
    pub fn find_by_id(&self, id: impl ToSqlValue) -> DataResult<Statement> {
        let id = require_id(&id)?;
        let resolved = self.resolver.resolve::<E>()?;
        Ok(Statement {
            kind: StatementKind::Select,
            sql: format!(
                "SELECT * FROM {} WHERE {} = ?;",
                resolved.descriptor.table_name(),
                resolved.descriptor.id_column()
            ),
            params: vec![id],
        })
    }

    /// `UPDATE <table> SET <col> = ?, ... WHERE <id> = ?;`
    ///
    /// Parameters are the non-identifier values in column order followed by
    /// the identifier value.
    ///
    /// # Errors
    ///
    /// `Mapping` when the instance's identifier is null or no column other
    /// than the identifier is mapped.
    pub fn update(&self, entity: Option<&E>) -> DataResult<Statement> {
        let entity = require_entity(entity)?;
        let resolved = self.resolver.resolve::<E>()?;
        let descriptor = &resolved.descriptor;

        let id_value = resolved.identifier_field().read(entity);
        if id_value.is_null() {
            return Err(DataError::Mapping(format!(
                "Identifier value must not be null for {} update",
                descriptor.type_name()
            )));
        }

        let id_column = descriptor.id_column();
        let values = column_values(&resolved, entity).without(id_column);
        if values.is_empty() {
            return Err(DataError::Mapping(format!(
                "No updatable columns mapped for entity {}",
                descriptor.type_name()
            )));
        }

        let assignments: Vec<String> = values.columns().map(|c| format!("{c} = ?")).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {id_column} = ?;",
            descriptor.table_name(),
            assignments.join(", ")
        );
        let mut params = values.into_values();
        params.push(id_value);
        Ok(Statement {
            kind: StatementKind::Update,
            sql,
            params,
        })
    }

    /// `DELETE FROM <table> WHERE <id> = ?;` with `[id]`.
    pub fn delete_by_id(&self, id: impl ToSqlValue) -> DataResult<Statement> {
        let id = require_id(&id)?;
        let resolved = self.resolver.resolve::<E>()?;
        Ok(Statement {
            kind: StatementKind::Delete,
            sql: format!(
                "DELETE FROM {} WHERE {} = ?;",
                resolved.descriptor.table_name(),
                resolved.descriptor.id_column()
            ),
            params: vec![id],
        })
    }

    /// Every mapped column of `entity`, identifier included, in SQL order.
    pub fn column_values(&self, entity: &E) -> DataResult<ColumnValues> {
        let resolved = self.resolver.resolve::<E>()?;
        Ok(column_values(&resolved, entity))
    }
}

fn column_values<E>(resolved: &ResolvedEntity<E>, entity: &E) -> ColumnValues {
    let entries = resolved
        .descriptor
        .columns()
        .iter()
        .zip(&resolved.fields)
        .map(|(column, field)| (column.column.clone(), field.read(entity)))
        .collect();
    ColumnValues { entries }
}

fn require_entity<E>(entity: Option<&E>) -> DataResult<&E> {
    entity.ok_or_else(|| DataError::InvalidArgument("Entity must not be null".into()))
}

fn require_id(id: &impl ToSqlValue) -> DataResult<SqlValue> {
    match id.to_sql_value() {
        SqlValue::Null => Err(DataError::InvalidArgument("Identifier must not be null".into())),
        value => Ok(value),
    }
}
