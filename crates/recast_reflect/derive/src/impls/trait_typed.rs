use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Typed`.
///
/// `desc_kind_tokens` is an expression of type `DescKind`.
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    desc_kind_tokens: TokenStream,
    active_types: &[&Type],
) -> TokenStream {
    let recast_reflect_path = meta.recast_reflect_path();
    let typed_ = crate::path::typed_(recast_reflect_path);
    let type_desc_ = crate::path::type_desc_(recast_reflect_path);
    let with_type_name = meta.with_type_name_expression();

    let inner_cell_tokens = if meta.impl_with_generic() {
        let desc_cell = crate::path::generic_type_desc_cell_(recast_reflect_path);
        quote! {
            static CELL: #desc_cell = #desc_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_desc_::new::<Self>(#desc_kind_tokens) #with_type_name
            })
        }
    } else {
        let desc_cell = crate::path::non_generic_type_desc_cell_(recast_reflect_path);
        quote! {
            static CELL: #desc_cell = #desc_cell::new();
            CELL.get_or_init(|| {
                #type_desc_::new::<Self>(#desc_kind_tokens) #with_type_name
            })
        }
    };

    let ident = meta.ident();
    let with_default = meta.attrs().default.is_some();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(active_types, with_default);

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_desc() -> &'static #type_desc_ {
                #inner_cell_tokens
            }
        }
    }
}
