use syn::{Ident, Variant, punctuated::Punctuated, token::Comma};

use super::ReflectMeta;

pub(crate) struct ReflectEnum<'a> {
    meta: ReflectMeta<'a>,
    variants: Vec<&'a Ident>,
}

impl<'a> ReflectEnum<'a> {
    pub fn new(meta: ReflectMeta<'a>, variants: &'a Punctuated<Variant, Comma>) -> syn::Result<Self> {
        if variants.is_empty() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Reflect` cannot be derived for enums without variants",
            ));
        }
        Ok(Self {
            meta,
            variants: variants.iter().map(|variant| &variant.ident).collect(),
        })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Variant identifiers in declaration order.
    #[inline]
    pub fn variants(&self) -> &[&'a Ident] {
        &self.variants
    }
}
