use syn::{Data, DeriveInput};

use super::{ReflectEnum, ReflectMeta, ReflectStruct, TypeAttributes};

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let meta = ReflectMeta::new(attrs, &input.ident, &input.generics)?;
                Ok(Self::Struct(ReflectStruct::new(meta, &data.fields)?))
            }
            Data::Enum(data) => {
                if let Some(span) = attrs.default {
                    return Err(syn::Error::new(span, "`default` is only supported on structs"));
                }
                let meta = ReflectMeta::new(attrs, &input.ident, &input.generics)?;
                Ok(Self::Enum(ReflectEnum::new(meta, &data.variants)?))
            }
            Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}
