use sqlx::{Database, Pool};

/// Statement executor backed by an `sqlx::Pool<DB>`.
///
/// Binds the statement's parameters positionally, in list order, and runs it
/// on a pooled connection. Driver errors surface as
/// [`DataError::Execution`](rowmap_data::DataError::Execution).
///
/// Statements use `?` placeholders, so the pool must belong to a driver that
/// accepts them (SQLite, MySQL).
///
/// # Example
///
/// ```ignore
/// let executor = SqlxExecutor::new(pool.clone());
/// let repo = MappedRepository::<User, i64, _>::new(executor);
/// repo.save(Some(&user)).await?;
/// ```
pub struct SqlxExecutor<DB: Database> {
    pool: Pool<DB>,
}

impl<DB: Database> SqlxExecutor<DB> {
    pub fn new(pool: Pool<DB>) -> Self {
        Self { pool }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }
}

impl<DB: Database> Clone for SqlxExecutor<DB> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

macro_rules! impl_sqlx_executor {
    ($feature:literal, $db:ty) => {
        #[cfg(feature = $feature)]
        const _: () = {
            use rowmap_data::{DataResult, SqlValue, Statement, StatementExecutor};

            use crate::error::SqlxErrorExt;

            impl StatementExecutor for SqlxExecutor<$db> {
                async fn execute(&self, statement: &Statement) -> DataResult<u64> {
                    let mut query = sqlx::query::<$db>(&statement.sql);
                    for value in &statement.params {
                        query = match value {
                            SqlValue::Null => query.bind(None::<String>),
                            SqlValue::Bool(b) => query.bind(*b),
                            SqlValue::Int(i) => query.bind(*i),
                            SqlValue::Float(f) => query.bind(*f),
                            SqlValue::Text(s) => query.bind(s.clone()),
                            SqlValue::Bytes(b) => query.bind(b.clone()),
                        };
                    }
                    let rows = query
                        .execute(&self.pool)
                        .await
                        .map_err(SqlxErrorExt::into_data_error)?
                        .rows_affected();
                    tracing::trace!(sql = %statement.sql, rows, "sqlx statement executed");
                    Ok(rows)
                }
            }
        };
    };
}

impl_sqlx_executor!("sqlite", sqlx::Sqlite);
impl_sqlx_executor!("mysql", sqlx::MySql);
