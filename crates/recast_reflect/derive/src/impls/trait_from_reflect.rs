use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `FromReflect`, a plain downcast.
pub(crate) fn impl_trait_from_reflect(meta: &ReflectMeta, active_types: &[&Type]) -> TokenStream {
    let from_reflect_ = crate::path::from_reflect_(meta.recast_reflect_path());

    let ident = meta.ident();
    let with_default = meta.attrs().default.is_some();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(active_types, with_default);

    quote! {
        impl #impl_generics #from_reflect_ for #ident #ty_generics #where_clause {}
    }
}
