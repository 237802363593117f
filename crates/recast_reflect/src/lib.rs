//! Static type descriptors and runtime field access for the `recast` marshaller.
//!
//! - [`Reflect`]: object-safe access to any reflected value.
//! - [`info`]: [`TypeDesc`](info::TypeDesc), the explicit descriptor of a
//!   native type, including the element/key/value types of containers.
//! - [`ops`]: the capability traits behind [`ReflectRef`](ops::ReflectRef)
//!   ([`Object`](ops::Object), [`List`](ops::List), [`Map`](ops::Map), ...)
//!   and the dynamic containers used when no concrete type is known.
//! - [`derive`]: `#[derive(Reflect)]` for structs and enums.
//!
//! ```
//! use recast_reflect::{Reflect, derive::Reflect, ops::ReflectRef};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let point = Point { x: 1, y: 2 };
//! let ReflectRef::Object(object) = point.reflect_ref() else { unreachable!() };
//! assert_eq!(object.field("y").unwrap().downcast_ref::<i32>(), Some(&2));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to this crate as `::recast_reflect`, also from within
// the crate and its doctests.
extern crate self as recast_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use recast_reflect_derive as derive;
pub use reflection::{FromReflect, Reflect};
