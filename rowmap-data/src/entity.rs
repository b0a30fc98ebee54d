use crate::mapping::EntityMapping;

/// Trait for types whose instances are persisted as table rows.
///
/// The mapping is an explicit registration: it lists, in declaration order,
/// every field with its tag and a getter. Intended to be implemented via
/// `#[derive(Entity)]`, or by hand:
///
/// ```ignore
/// impl Entity for User {
///     fn mapping() -> EntityMapping<Self> {
///         EntityMapping::<Self>::entity("User")
///             .table("users")
///             .field(FieldTag::id(), "id", |u| &u.id)
///             .field(FieldTag::column_named("full_name"), "name", |u| &u.name)
///     }
/// }
/// ```
pub trait Entity: Sized + Send + Sync + 'static {
    fn mapping() -> EntityMapping<Self>;
}
