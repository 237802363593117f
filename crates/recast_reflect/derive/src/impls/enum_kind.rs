use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectEnum;
use crate::impls::{impl_trait_from_reflect, impl_trait_reflect, impl_trait_typed};

/// Implements `Typed`, `Reflect`, `TaggedUnion` and `FromReflect` for an enum.
///
/// Variant payloads are not reflected.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let recast_reflect_path = meta.recast_reflect_path();
    let desc_kind_ = crate::path::desc_kind_(recast_reflect_path);
    let tagged_union_desc_ = crate::path::tagged_union_desc_(recast_reflect_path);
    let tagged_union_ = crate::path::tagged_union_(recast_reflect_path);

    let variants = info.variants();
    let len = variants.len();
    let names: Vec<String> = variants.iter().map(|variant| variant.to_string()).collect();
    let indices = 0..len;

    let desc_kind_tokens = quote! {
        #desc_kind_::TaggedUnion(
            #tagged_union_desc_::new([#(#names),*] as [&'static str; #len])
        )
    };

    let typed_impl = impl_trait_typed(meta, desc_kind_tokens, &[]);
    let reflect_impl = impl_trait_reflect(meta, quote!(TaggedUnion), &[]);
    let from_reflect_impl = impl_trait_from_reflect(meta, &[]);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&[], false);

    quote! {
        #typed_impl

        #reflect_impl

        impl #impl_generics #tagged_union_ for #ident #ty_generics #where_clause {
            fn variant_name(&self) -> &str {
                match self {
                    #(Self::#variants { .. } => #names,)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#variants { .. } => #indices,)*
                }
            }
        }

        #from_reflect_impl
    }
}
