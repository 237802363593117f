//! See [`Reflect`](derive_reflect).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `Typed`
/// - `Reflect`
/// - `FromReflect`
/// - `Object` (for `struct T { ... }`)
/// - `TaggedUnion` (for `enum T { ... }`)
///
/// Tuple structs, unit structs and unions are rejected. Enum payloads are
/// not reflected: an enum is only known by its active variant.
///
/// ## Type Attributes
///
/// ### Constructor
///
/// A struct can only be deserialized if it can be created empty.
/// `#[reflect(default)]` uses its `Default` impl for that:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo { /* ... */ }
/// ```
///
/// ### Custom Type Name
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "shapes::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// - `#[reflect(skip)]`: the field is not reflected. Its type needs no
///   reflection support, and it keeps its `Default` value on deserialization.
/// - `#[reflect(rename = "name")]`: the field is reflected under `name`.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo {
///     #[reflect(rename = "type")]
///     kind: String,
///     #[reflect(skip)]
///     cache: std::sync::Mutex<Vec<u8>>,
/// }
/// ```
///
/// ## Generics
///
/// Type parameters get `Send + Sync + 'static`, and every reflected field
/// type gets `FromReflect + Typed`. Lifetime parameters are not supported.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(&ast)
}
