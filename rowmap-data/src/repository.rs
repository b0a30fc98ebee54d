use crate::error::DataError;
use std::future::Future;

/// Generic async repository trait for CRUD by primary key.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait`.
/// A `None` entity or identifier fails with [`DataError::InvalidArgument`]
/// before any SQL is built.
pub trait CrudRepository<E, ID>: Send + Sync
where
    E: Send + Sync + 'static,
    ID: Send + Sync + 'static,
{
    fn save(&self, entity: Option<&E>) -> impl Future<Output = Result<(), DataError>> + Send;
    fn find_by_id(&self, id: impl Into<Option<ID>>) -> impl Future<Output = Result<(), DataError>> + Send;
    fn update(&self, entity: Option<&E>) -> impl Future<Output = Result<(), DataError>> + Send;
    fn delete_by_id(&self, id: impl Into<Option<ID>>) -> impl Future<Output = Result<(), DataError>> + Send;
}
