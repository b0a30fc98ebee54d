pub mod config;
pub mod crud;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod executor;
pub mod mapping;
pub mod repository;
pub mod resolver;
pub mod statement;
pub mod value;

pub use config::DataConfig;
pub use crud::MappedRepository;
pub use descriptor::{ColumnDescriptor, EntityDescriptor};
pub use entity::Entity;
pub use error::{DataError, DataResult};
pub use executor::{LoggingExecutor, StatementExecutor};
pub use mapping::{ColumnTag, EntityMapping, FieldMapping, FieldTag, IdTag, DEFAULT_COLUMN_LENGTH};
pub use repository::CrudRepository;
pub use resolver::{describe, IdentifierPolicy, MetadataResolver};
pub use statement::{ColumnValues, Statement, StatementBuilder, StatementKind};
pub use value::{SqlValue, ToSqlValue};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{
        CrudRepository, DataError, Entity, EntityMapping, FieldTag, MappedRepository, SqlValue,
        StatementBuilder, StatementExecutor, ToSqlValue,
    };
}
