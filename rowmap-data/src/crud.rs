use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::DataConfig;
use crate::entity::Entity;
use crate::error::DataError;
use crate::executor::StatementExecutor;
use crate::repository::CrudRepository;
use crate::resolver::MetadataResolver;
use crate::statement::{Statement, StatementBuilder};
use crate::value::ToSqlValue;

/// A repository that synthesizes statements from an entity's mapping and
/// hands them to a [`StatementExecutor`].
///
/// # Example
///
/// ```ignore
/// let repo = MappedRepository::<User, i64, _>::new(LoggingExecutor);
/// repo.save(Some(&user)).await?;
/// repo.delete_by_id(7).await?;
/// ```
pub struct MappedRepository<E, ID, X> {
    executor: X,
    resolver: Arc<MetadataResolver>,
    log_statements: bool,
    _marker: PhantomData<fn() -> (E, ID)>,
}

impl<E, ID, X> MappedRepository<E, ID, X>
where
    E: Entity,
    ID: ToSqlValue + Send + Sync + 'static,
    X: StatementExecutor,
{
    pub fn new(executor: X) -> Self {
        Self::with_resolver(executor, Arc::new(MetadataResolver::new()))
    }

    /// Build a repository honouring the data-layer configuration.
    pub fn from_config(executor: X, config: &DataConfig) -> Self {
        let mut repo = Self::with_resolver(executor, Arc::new(MetadataResolver::from_config(config)));
        repo.log_statements = config.log_statements;
        repo
    }

    /// Share a resolver (and its cache) between repositories.
    pub fn with_resolver(executor: X, resolver: Arc<MetadataResolver>) -> Self {
        Self {
            executor,
            resolver,
            log_statements: false,
            _marker: PhantomData,
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// The statement builder used by every operation.
    pub fn statements(&self) -> StatementBuilder<'_, E> {
        StatementBuilder::new(&self.resolver)
    }

    async fn dispatch(&self, statement: Statement) -> Result<(), DataError> {
        if self.log_statements {
            tracing::info!(sql = %statement.sql, params = %statement.params_display(), "dispatching statement");
        } else {
            tracing::debug!(sql = %statement.sql, params = %statement.params_display(), "dispatching statement");
        }
        match self.executor.execute(&statement).await {
            Ok(rows) => {
                tracing::trace!(kind = ?statement.kind, rows, "statement executed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(sql = %statement.sql, error = %err, "statement execution failed");
                Err(err)
            }
        }
    }
}

impl<E, ID, X> CrudRepository<E, ID> for MappedRepository<E, ID, X>
where
    E: Entity,
    ID: ToSqlValue + Send + Sync + 'static,
    X: StatementExecutor,
{
    fn save(&self, entity: Option<&E>) -> impl Future<Output = Result<(), DataError>> + Send {
        let built = self.statements().save(entity);
        async move { self.dispatch(built?).await }
    }

    fn find_by_id(&self, id: impl Into<Option<ID>>) -> impl Future<Output = Result<(), DataError>> + Send {
        let built = self.statements().find_by_id(id.into());
        async move { self.dispatch(built?).await }
    }

    fn update(&self, entity: Option<&E>) -> impl Future<Output = Result<(), DataError>> + Send {
        let built = self.statements().update(entity);
        async move { self.dispatch(built?).await }
    }

    fn delete_by_id(&self, id: impl Into<Option<ID>>) -> impl Future<Output = Result<(), DataError>> + Send {
        let built = self.statements().delete_by_id(id.into());
        async move { self.dispatch(built?).await }
    }
}
