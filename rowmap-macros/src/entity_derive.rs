use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitBool, LitInt, LitStr, Type};

use crate::crate_path::rowmap_data_path;

pub fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match generate(&input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed struct-level `#[entity(...)]`.
#[derive(Default)]
struct EntityAttr {
    table: Option<String>,
    embeddable: bool,
}

struct IdAttr {
    name: Option<String>,
}

struct ColumnAttr {
    name: Option<String>,
    nullable: Option<bool>,
    length: Option<u32>,
}

enum FieldKind {
    Mapped {
        id: Option<IdAttr>,
        column: Option<ColumnAttr>,
    },
    Embedded,
}

struct FieldInfo {
    ident: Ident,
    ty: Type,
    kind: FieldKind,
}

fn parse_entity_attr(input: &DeriveInput) -> syn::Result<EntityAttr> {
    let mut result = EntityAttr::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        // Bare `#[entity]` carries no arguments.
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") || meta.path.is_ident("name") {
                if result.table.is_some() {
                    return Err(meta.error("table name given twice; use either `table` or `name`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                result.table = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("embeddable") {
                result.embeddable = true;
                Ok(())
            } else {
                Err(meta.error("expected `table = \"...\"`, `name = \"...\"`, or `embeddable` in #[entity(...)]"))
            }
        })?;
    }
    if result.embeddable && result.table.is_some() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[entity(embeddable)] types have no table; remove `table`/`name`",
        ));
    }
    Ok(result)
}

fn parse_id_attr(attr: &syn::Attribute) -> syn::Result<IdAttr> {
    let mut id = IdAttr { name: None };
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(id);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            id.name = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("expected `name = \"...\"` in #[id(...)]"))
        }
    })?;
    Ok(id)
}

fn parse_column_attr(attr: &syn::Attribute) -> syn::Result<ColumnAttr> {
    let mut column = ColumnAttr {
        name: None,
        nullable: None,
        length: None,
    };
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(column);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            column.name = Some(lit.value());
            Ok(())
        } else if meta.path.is_ident("nullable") {
            // `nullable` alone means `nullable = true`
            column.nullable = Some(if meta.input.peek(syn::Token![=]) {
                let lit: LitBool = meta.value()?.parse()?;
                lit.value
            } else {
                true
            });
            Ok(())
        } else if meta.path.is_ident("length") {
            let lit: LitInt = meta.value()?.parse()?;
            column.length = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `name`, `nullable`, or `length` in #[column(...)]"))
        }
    })?;
    Ok(column)
}

fn parse_field(field: &syn::Field) -> syn::Result<FieldInfo> {
    // Named fields always carry an ident.
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

    let mut id = None;
    let mut column = None;
    let mut embedded = false;
    for attr in &field.attrs {
        if attr.path().is_ident("id") {
            if id.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[id] attribute"));
            }
            id = Some(parse_id_attr(attr)?);
        } else if attr.path().is_ident("column") {
            if column.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
            }
            column = Some(parse_column_attr(attr)?);
        } else if attr.path().is_ident("embedded") {
            embedded = true;
        }
    }

    let kind = if embedded {
        if id.is_some() || column.is_some() {
            return Err(syn::Error::new_spanned(
                &ident,
                "#[embedded] cannot be combined with #[id] or #[column]",
            ));
        }
        FieldKind::Embedded
    } else {
        FieldKind::Mapped { id, column }
    };

    Ok(FieldInfo {
        ident,
        ty: field.ty.clone(),
        kind,
    })
}

fn option_string(value: &Option<String>) -> TokenStream2 {
    match value {
        Some(s) => quote!(::core::option::Option::Some(::std::string::String::from(#s))),
        None => quote!(::core::option::Option::None),
    }
}

fn tag_tokens(id: &Option<IdAttr>, column: &Option<ColumnAttr>, krate: &TokenStream2) -> TokenStream2 {
    let id_tokens = match id {
        Some(id) => {
            let name = option_string(&id.name);
            quote!(::core::option::Option::Some(#krate::IdTag { name: #name }))
        }
        None => quote!(::core::option::Option::None),
    };
    let column_tokens = match column {
        Some(column) => {
            let name = option_string(&column.name);
            let nullable = column.nullable.unwrap_or(true);
            let length = match column.length {
                Some(l) => quote!(#l),
                None => quote!(#krate::DEFAULT_COLUMN_LENGTH),
            };
            quote! {
                ::core::option::Option::Some(#krate::ColumnTag {
                    name: #name,
                    nullable: #nullable,
                    length: #length,
                })
            }
        }
        None => quote!(::core::option::Option::None),
    };
    quote!(#krate::FieldTag { id: #id_tokens, column: #column_tokens })
}

fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let krate = rowmap_data_path();
    let entity = parse_entity_attr(input)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "#[derive(Entity)] only works on structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Entity)] only works on structs",
            ))
        }
    };

    let field_infos = fields.iter().map(parse_field).collect::<syn::Result<Vec<_>>>()?;

    let registrations: Vec<TokenStream2> = field_infos
        .iter()
        .filter_map(|f| {
            let ident = &f.ident;
            let field_name = ident.to_string();
            match &f.kind {
                // Untagged fields are not persisted and may hold any type.
                FieldKind::Mapped { id: None, column: None } => None,
                FieldKind::Mapped { id, column } => {
                    let tag = tag_tokens(id, column, &krate);
                    Some(quote!(.field(#tag, #field_name, |__e| &__e.#ident)))
                }
                FieldKind::Embedded => {
                    let ty = &f.ty;
                    Some(quote! {
                        .embed(
                            #field_name,
                            |__e| &__e.#ident,
                            <#ty as #krate::Entity>::mapping(),
                        )
                    })
                }
            }
        })
        .collect();

    let type_name = name.to_string();
    let start = if entity.embeddable {
        quote!(#krate::EntityMapping::<Self>::embeddable(#type_name))
    } else {
        quote!(#krate::EntityMapping::<Self>::entity(#type_name))
    };
    let table = entity.table.as_ref().map(|t| quote!(.table(#t)));

    Ok(quote! {
        impl #impl_generics #krate::Entity for #name #ty_generics #where_clause {
            fn mapping() -> #krate::EntityMapping<Self> {
                #start
                    #table
                    #(#registrations)*
            }
        }
    })
}
