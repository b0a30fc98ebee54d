//! Crate path resolution for generated code.
//!
//! Detects whether the user depends on `rowmap` (facade) or `rowmap-data`
//! directly, and returns the appropriate path prefix for generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing `rowmap_data` types.
///
/// If the user depends on `rowmap`, returns `::rowmap::rowmap_data`.
/// Otherwise returns `::rowmap_data`.
pub fn rowmap_data_path() -> TokenStream {
    if let Ok(found) = crate_name("rowmap") {
        match found {
            FoundCrate::Itself => quote!(crate::rowmap_data),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident::rowmap_data)
            }
        }
    } else if let Ok(found) = crate_name("rowmap-data") {
        match found {
            FoundCrate::Itself => quote!(crate),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else {
        // Fallback - assume rowmap_data is available (for error messages)
        quote!(::rowmap_data)
    }
}
