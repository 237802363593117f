use syn::{Fields, Ident, LitStr, Type};

use super::{FieldAttributes, ReflectMeta};

/// A reflected (not skipped) named field.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The reflected name, after `rename`.
    pub name: LitStr,
}

pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let Fields::Named(named) = fields else {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Reflect` can only be derived for structs with named fields",
            ));
        };

        let mut reflected: Vec<StructField<'a>> = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = attrs
                .rename
                .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
            if let Some(other) = reflected.iter().find(|f| f.name.value() == name.value()) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("field name `{}` is already used by `{}`", name.value(), other.ident),
                ));
            }
            reflected.push(StructField {
                ident,
                ty: &field.ty,
                name,
            });
        }

        Ok(Self {
            meta,
            fields: reflected,
        })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    pub fn active_types(&self) -> Vec<&'a Type> {
        self.fields.iter().map(|field| field.ty).collect()
    }
}
