use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Everything the generated impls share: the crate path, the type-level
/// attributes, the type's name and its generics.
pub(crate) struct ReflectMeta<'a> {
    recast_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("recast_reflect_path", &self.recast_reflect_path.to_token_stream())
            .field("ident", self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Reflect` cannot be derived for types with lifetime parameters",
            ));
        }
        Ok(Self {
            recast_reflect_path: crate::path::recast_reflect(),
            attrs,
            ident,
            generics,
        })
    }

    #[inline]
    pub fn recast_reflect_path(&self) -> &Path {
        &self.recast_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Whether the `static CELL` of `Typed` must be a generic cell.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some() || self.generics.const_params().next().is_some()
    }

    /// `.with_type_name("...")` if a custom type path was given.
    pub fn with_type_name_expression(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(type_path) => quote!(.with_type_name(#type_path)),
            None => TokenStream::new(),
        }
    }

    /// Splits the generics for an impl block.
    ///
    /// The where clause gets `Send + Sync + 'static` on every type
    /// parameter, `FromReflect + Typed` on every type in `active_types`, and
    /// `Self: Default` when `with_default` is set.
    pub fn split_generics(
        &self,
        active_types: &[&Type],
        with_default: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let recast_reflect_path = &self.recast_reflect_path;
        let from_reflect_ = crate::path::from_reflect_(recast_reflect_path);
        let typed_ = crate::path::typed_(recast_reflect_path);

        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let existing = where_clause.map(|clause| {
            let predicates = clause.predicates.iter();
            quote!(#(#predicates,)*)
        });
        let params = self.generics.type_params().map(|param| &param.ident);
        let params = quote! {
            #(#params: ::core::marker::Send + ::core::marker::Sync + 'static,)*
        };
        let fields = if self.generics.params.is_empty() {
            // Concrete field types are checked where they are used.
            TokenStream::new()
        } else {
            quote! {
                #(#active_types: #from_reflect_ + #typed_,)*
            }
        };
        let default = if with_default && !self.generics.params.is_empty() {
            quote!(Self: ::core::default::Default,)
        } else {
            TokenStream::new()
        };

        let where_clause = if existing.is_none() && self.generics.params.is_empty() {
            TokenStream::new()
        } else {
            quote! {
                where #existing #params #fields #default
            }
        };

        (impl_generics, ty_generics, where_clause)
    }
}
