use proc_macro2::Span;
use syn::{Attribute, Ident, LitStr, Token, parse::ParseStream};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Calls `f` once per `name` or `name = "value"` item of every
/// `#[reflect(...)]` attribute.
fn parse_reflect_items(
    attrs: &[Attribute],
    mut f: impl FnMut(&Ident, ParseStream) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_args_with(|input: ParseStream| {
            while !input.is_empty() {
                let ident: Ident = input.parse()?;
                f(&ident, input)?;
                if input.is_empty() {
                    break;
                }
                input.parse::<Token![,]>()?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn parse_str_value(input: ParseStream) -> syn::Result<LitStr> {
    input.parse::<Token![=]>()?;
    input.parse()
}

fn duplicate(ident: &Ident) -> syn::Error {
    syn::Error::new(ident.span(), format!("duplicate `{ident}` attribute"))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level `#[reflect(...)]` options.
///
/// - `default`: the type implements `Default`, so it can be constructed
///   during deserialization.
/// - `type_path = "..."`: the name reported by the type descriptor.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_reflect_items(attrs, |ident, input| {
            if ident == "default" {
                if this.default.is_some() {
                    return Err(duplicate(ident));
                }
                this.default = Some(ident.span());
            } else if ident == "type_path" {
                if this.type_path.is_some() {
                    return Err(duplicate(ident));
                }
                this.type_path = Some(parse_str_value(input)?);
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown type attribute `{ident}`, expected `default` or `type_path`"),
                ));
            }
            Ok(())
        })?;
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field-level `#[reflect(...)]` options.
///
/// - `skip`: the field is not reflected and puts no bounds on its type.
/// - `rename = "..."`: the reflected name of the field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_reflect_items(attrs, |ident, input| {
            if ident == "skip" {
                if this.skip {
                    return Err(duplicate(ident));
                }
                this.skip = true;
            } else if ident == "rename" {
                if this.rename.is_some() {
                    return Err(duplicate(ident));
                }
                this.rename = Some(parse_str_value(input)?);
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown field attribute `{ident}`, expected `skip` or `rename`"),
                ));
            }
            Ok(())
        })?;
        Ok(this)
    }
}
