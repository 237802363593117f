//! Explicit type descriptors.
//!
//! Every reflected type owns one `'static` [`TypeDesc`], obtained through
//! [`Typed::type_desc`] or, from a value, [`DynamicTyped::reflect_type_desc`].
//! Descriptors of containers carry the descriptors of their element, key and
//! value types, so an empty `Vec<T>` still knows what `T` is.
//!
//! Nested descriptors are referenced through [`DescFn`] and resolved lazily,
//! which allows recursive types.

// -----------------------------------------------------------------------------
// Modules

mod containers;
mod record_desc;
mod type_desc;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use containers::{ArrayDesc, FromItemsFn, ListDesc, MapDesc};
pub use record_desc::{FieldDesc, RecordDesc, TaggedUnionDesc};
pub use type_desc::{DescFn, DescKind, NativeScalar, TypeDesc};
pub use typed::{DynamicTyped, Typed};
