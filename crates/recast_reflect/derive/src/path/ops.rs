use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn reflect_ref_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn object_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::ops::Object
    }
}

#[inline(always)]
pub(crate) fn tagged_union_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::ops::TaggedUnion
    }
}
