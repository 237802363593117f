use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn non_generic_type_desc_cell_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::impls::NonGenericTypeDescCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_desc_cell_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::impls::GenericTypeDescCell
    }
}
