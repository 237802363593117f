use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_desc_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::TypeDesc
    }
}

#[inline(always)]
pub(crate) fn desc_kind_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::DescKind
    }
}

#[inline(always)]
pub(crate) fn record_desc_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::RecordDesc
    }
}

#[inline(always)]
pub(crate) fn field_desc_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::FieldDesc
    }
}

#[inline(always)]
pub(crate) fn tagged_union_desc_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::info::TaggedUnionDesc
    }
}
