use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect`.
///
/// `reflect_kind_token` is the `ReflectRef` variant wrapping `self`.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_kind_token: TokenStream,
    active_types: &[&Type],
) -> TokenStream {
    let recast_reflect_path = meta.recast_reflect_path();
    let reflect_ = crate::path::reflect_(recast_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(recast_reflect_path);

    let ident = meta.ident();
    let with_default = meta.attrs().default.is_some();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(active_types, with_default);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }
        }
    }
}
