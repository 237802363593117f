//! Reflection-driven conversion between native object graphs and
//! self-describing [`Record`](record::Record)s.
//!
//! This facade re-exports the member crates under short names:
//!
//! - [`utils`]: hash containers and `TypeIdMap`.
//! - [`record`]: the structured value itself.
//! - [`reflect`]: type descriptors, the `Reflect` trait and its derive.
//! - [`marshal`]: the `Marshaller` and its `Registry`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use recast_marshal as marshal;
pub use recast_record as record;
pub use recast_reflect as reflect;
pub use recast_utils as utils;

/// The most used items.
pub mod prelude {
    pub use crate::marshal::{MarshalError, Marshaller, Registry, RegistryBuilder};
    pub use crate::record::{Record, Scalar, ScalarKind, Shape};
    pub use crate::reflect::derive::Reflect;
    pub use crate::reflect::ops::{DynamicList, DynamicMap, Variant};
    pub use crate::reflect::{FromReflect, Reflect};
}
