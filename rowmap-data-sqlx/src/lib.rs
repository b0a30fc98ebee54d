//! # rowmap-data-sqlx — SQLx backend for rowmap
//!
//! Runs the statements produced by [`rowmap-data`](rowmap_data) against a
//! real database through an `sqlx::Pool`.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SqlxExecutor`] | [`StatementExecutor`](rowmap_data::StatementExecutor) holding an `sqlx::Pool<DB>` |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, DataError>` |
//!
//! # Feature flags
//!
//! | Feature  | Driver |
//! |----------|--------|
//! | `sqlite` | SQLite via `sqlx/sqlite` (default) |
//! | `mysql`  | MySQL via `sqlx/mysql` |
//!
//! Statements use `?` placeholders; drivers expecting `$n` are not wired.
//!
//! # Quick start
//!
//! ```ignore
//! use rowmap_data::{CrudRepository, MappedRepository};
//! use rowmap_data_sqlx::SqlxExecutor;
//!
//! let pool = sqlx::SqlitePool::connect("sqlite::memory:").await?;
//! let repo = MappedRepository::<User, i64, _>::new(SqlxExecutor::new(pool));
//! repo.save(Some(&user)).await?;
//! ```

pub mod error;
pub mod executor;

pub use error::{SqlxErrorExt, SqlxResult};
pub use executor::SqlxExecutor;

/// Re-exports of the most commonly used types from both `rowmap-data` and this crate.
pub mod prelude {
    pub use crate::{SqlxErrorExt, SqlxExecutor};
    pub use rowmap_data::prelude::*;
}
