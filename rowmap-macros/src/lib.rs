extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod crate_path;
pub(crate) mod entity_derive;

/// Derive macro registering a struct's persisted fields.
///
/// Generates `impl Entity for Name` whose `mapping()` lists every named field
/// in declaration order together with its tags and a getter. No runtime
/// reflection is involved: the registration is ordinary code.
///
/// # Struct-level attribute
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | *(none)* / `#[entity]` | Persistable entity; table name = struct name |
/// | `#[entity(table = "users")]` | Explicit table name (`name = "..."` is an alias) |
/// | `#[entity(embeddable)]` | Base type to embed into entities; not an entity itself |
///
/// # Field attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` / `#[id(name = "user_id")]` | Identifier (primary key), optionally renamed |
/// | `#[column]` | Persisted column named after the field |
/// | `#[column(name = "...", nullable = false, length = 64)]` | Column with explicit name and hints |
/// | `#[embedded]` | Flatten an `#[entity(embeddable)]` type's fields after this struct's own fields |
///
/// Fields without any of these attributes are left out of the mapping and may
/// have any type.
///
/// # Example
///
/// ```ignore
/// use rowmap::prelude::*;
///
/// #[derive(Entity)]
/// #[entity(embeddable)]
/// pub struct Audit {
///     #[column(name = "created_by")]
///     pub author: String,
/// }
///
/// #[derive(Entity)]
/// #[entity(table = "users")]
/// pub struct User {
///     #[id]
///     pub id: i64,
///     #[column(name = "full_name", nullable = false, length = 120)]
///     pub name: String,
///     #[embedded]
///     pub audit: Audit,
///     pub roles: Vec<String>, // not persisted
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, id, column, embedded))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity_derive::expand(input)
}
