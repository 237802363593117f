use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;
use crate::impls::{impl_trait_from_reflect, impl_trait_reflect, impl_trait_typed};

/// Implements `Typed`, `Reflect`, `Object` and `FromReflect` for a struct
/// with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let active_types = info.active_types();

    let desc_kind_tokens = desc_kind_tokens(info);
    let typed_impl = impl_trait_typed(meta, desc_kind_tokens, &active_types);
    let reflect_impl = impl_trait_reflect(meta, quote!(Object), &active_types);
    let object_impl = impl_object(info);
    let from_reflect_impl = impl_trait_from_reflect(meta, &active_types);

    quote! {
        #typed_impl

        #reflect_impl

        #object_impl

        #from_reflect_impl
    }
}

/// `DescKind::Record(RecordDesc::new([...]) .with_constructor(...))`
fn desc_kind_tokens(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let recast_reflect_path = meta.recast_reflect_path();
    let desc_kind_ = crate::path::desc_kind_(recast_reflect_path);
    let record_desc_ = crate::path::record_desc_(recast_reflect_path);
    let field_desc_ = crate::path::field_desc_(recast_reflect_path);
    let object_ = crate::path::object_(recast_reflect_path);

    let len = info.fields().len();
    let field_descs = info.fields().iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote!(#field_desc_::new::<#ty>(#name))
    });

    let with_constructor = meta.attrs().default.map(|_| {
        quote! {
            .with_constructor(|| {
                ::std::boxed::Box::new(<Self as ::core::default::Default>::default())
                    as ::std::boxed::Box<dyn #object_>
            })
        }
    });

    quote! {
        #desc_kind_::Record(
            #record_desc_::new([#(#field_descs),*] as [#field_desc_; #len])
                #with_constructor
        )
    }
}

fn impl_object(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let recast_reflect_path = meta.recast_reflect_path();
    let reflect_ = crate::path::reflect_(recast_reflect_path);
    let from_reflect_ = crate::path::from_reflect_(recast_reflect_path);
    let object_ = crate::path::object_(recast_reflect_path);

    let fields = info.fields();
    let len = fields.len();
    let names: Vec<_> = fields.iter().map(|field| &field.name).collect();
    let idents: Vec<_> = fields.iter().map(|field| field.ident).collect();
    let types: Vec<_> = fields.iter().map(|field| field.ty).collect();
    let indices = 0..len;

    let ident = meta.ident();
    let with_default = meta.attrs().default.is_some();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&info.active_types(), with_default);

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(<#types as #reflect_>::as_reflect(&self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(<#types as #reflect_>::as_reflect(&self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                const NAMES: [&str; #len] = [#(#names),*];
                NAMES.get(index).copied()
            }

            #[inline]
            fn field_len(&self) -> usize {
                #len
            }

            fn set_field(
                &mut self,
                name: &str,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                match name {
                    #(#names => {
                        self.#idents = <#types as #from_reflect_>::take_reflect(value)?;
                        ::core::result::Result::Ok(())
                    })*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    }
}
