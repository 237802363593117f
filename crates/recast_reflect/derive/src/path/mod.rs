//! Paths into `recast_reflect` used by generated code.
//!
//! Kept in one place so that moving an item in `recast_reflect` only needs
//! a change here.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `recast_reflect` crate.
///
/// 1. For crates that depend on `recast_reflect`, `::recast_reflect` is returned.
/// 2. For crates that depend on `recast`, `::recast::reflect` is returned.
/// 3. For other situations, `::recast_reflect` is returned, but this may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is computed once per
/// derive and passed around.
pub(crate) fn recast_reflect() -> syn::Path {
    recast_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("recast_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;

#[inline(always)]
pub(crate) fn reflect_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn from_reflect_(recast_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #recast_reflect_path::FromReflect
    }
}
