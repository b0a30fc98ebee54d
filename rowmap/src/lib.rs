//! rowmap — map plain structs to tables and synthesize CRUD statements.
//!
//! This facade crate re-exports the rowmap sub-crates through a single
//! dependency with feature flags:
//!
//! ```ignore
//! use rowmap::prelude::*;
//!
//! #[derive(Entity)]
//! #[entity(table = "users")]
//! struct User {
//!     #[id]
//!     id: i64,
//!     #[column(name = "user_name", nullable = false)]
//!     name: String,
//! }
//!
//! let repo = MappedRepository::<User, i64, _>::new(LoggingExecutor);
//! repo.save(Some(&user)).await?;
//! ```
//!
//! # Feature flags
//!
//! | Feature     | Default | Crate                        |
//! |-------------|---------|------------------------------|
//! | `data-sqlx` | no      | `rowmap-data-sqlx`           |
//! | `sqlite`    | no      | `rowmap-data-sqlx/sqlite`    |
//! | `mysql`     | no      | `rowmap-data-sqlx/mysql`     |
//! | `uuid`      | no      | `rowmap-data/uuid`           |
//! | `chrono`    | no      | `rowmap-data/chrono`         |
//! | `full`      | no      | `sqlite`, `uuid`, `chrono`   |

// The derive uses `proc-macro-crate` to detect whether the user depends on
// `rowmap` (facade) or `rowmap-data` directly, and generates the matching
// paths through these re-exports.
pub extern crate rowmap_core;
pub extern crate rowmap_data;
pub extern crate rowmap_macros;

#[cfg(feature = "data-sqlx")]
pub use rowmap_data_sqlx;

pub use rowmap_core::{init_tracing, RowmapConfig};
pub use rowmap_data::{
    describe, CrudRepository, DataConfig, DataError, DataResult, Entity, EntityDescriptor,
    LoggingExecutor, MappedRepository, MetadataResolver, SqlValue, Statement, StatementBuilder,
    StatementExecutor, StatementKind,
};
pub use rowmap_macros::Entity;

/// Unified prelude — import everything with `use rowmap::prelude::*`.
pub mod prelude {
    pub use rowmap_core::{init_tracing, RowmapConfig};
    pub use rowmap_data::prelude::*;
    pub use rowmap_data::{DataConfig, LoggingExecutor, MetadataResolver};
    pub use rowmap_macros::Entity;

    #[cfg(feature = "data-sqlx")]
    pub use rowmap_data_sqlx::prelude::*;
}
