use std::future::Future;
use std::sync::Arc;

use crate::error::DataResult;
use crate::statement::Statement;

/// The statement-execution collaborator.
///
/// Receives SQL text with its ordered parameters and reports success or
/// failure. On success it returns the number of affected rows, which the
/// repository does not rely on. Failures are returned as
/// [`DataError::Execution`](crate::DataError::Execution) and are passed
/// through to the caller unmodified; retry policy, if any, lives here.
pub trait StatementExecutor: Send + Sync {
    fn execute(&self, statement: &Statement) -> impl Future<Output = DataResult<u64>> + Send;
}

impl<X: StatementExecutor> StatementExecutor for Arc<X> {
    fn execute(&self, statement: &Statement) -> impl Future<Output = DataResult<u64>> + Send {
        (**self).execute(statement)
    }
}

/// Executor that only logs each statement and its parameters.
///
/// Useful as a dry-run backend: nothing is sent anywhere and every
/// statement succeeds with zero affected rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingExecutor;

impl StatementExecutor for LoggingExecutor {
    async fn execute(&self, statement: &Statement) -> DataResult<u64> {
        tracing::info!(
            sql = %statement.sql,
            params = %statement.params_display(),
            "dry-run statement"
        );
        Ok(0)
    }
}
