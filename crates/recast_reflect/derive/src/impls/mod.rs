// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod struct_kind;
mod trait_from_reflect;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro::TokenStream;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

pub(crate) use trait_from_reflect::impl_trait_from_reflect;
pub(crate) use trait_reflect::impl_trait_reflect;
pub(crate) use trait_typed::impl_trait_typed;

pub(crate) fn match_reflect_impls(ast: &DeriveInput) -> TokenStream {
    let derive = match ReflectDerive::from_input(ast) {
        Ok(derive) => derive,
        Err(err) => return err.into_compile_error().into(),
    };

    match derive {
        ReflectDerive::Struct(reflect_struct) => struct_kind::impl_struct(&reflect_struct).into(),
        ReflectDerive::Enum(reflect_enum) => enum_kind::impl_enum(&reflect_enum).into(),
    }
}
