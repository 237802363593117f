//! Conversion between reflected object graphs and [`Record`]s.
//!
//! A [`Marshaller`] walks a value through its [`Reflect`] view, classifies
//! every field into a Record field kind and delegates to one codec per kind:
//!
//! - [`scalar`]: numbers, booleans, characters and strings.
//! - [`array`]: fixed arrays and sequences.
//! - [`map`]: string-keyed maps.
//! - [`union`]: [`Variant`] values as variant unions.
//! - [`record`]: structs, and the per-field dispatch used by all codecs.
//!
//! All behaviour that can be configured lives in an immutable [`Registry`]:
//! custom converters and deserializers, type identifiers and the handling of
//! unknown fields.
//!
//! # Examples
//!
//! ```
//! use recast_marshal::{Marshaller, Registry};
//! use recast_reflect::derive::Reflect;
//! use recast_reflect::ops::DynamicMap;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Order {
//!     id: i64,
//!     lines: Vec<Line>,
//!     note: Option<String>,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Line {
//!     sku: String,
//!     quantity: i16,
//! }
//!
//! let order = Order {
//!     id: 7,
//!     lines: vec![Line { sku: String::from("A-1"), quantity: 2 }],
//!     note: None,
//! };
//!
//! let registry = Registry::new();
//! let marshaller = Marshaller::new(&registry);
//!
//! let record = marshaller.serialize(&order).unwrap();
//! assert_eq!(record.len(), 2); // `note` is absent
//! assert_eq!(marshaller.deserialize_as::<Order>(&record).unwrap(), order);
//!
//! // Without a target, records come back as maps.
//! let generic = marshaller.deserialize(&record, None).unwrap();
//! let generic = generic.downcast_ref::<DynamicMap>().unwrap();
//! assert_eq!(generic.get_as::<i64>("id"), Some(&7));
//! ```
//!
//! [`Record`]: recast_record::Record
//! [`Reflect`]: recast_reflect::Reflect
//! [`Variant`]: recast_reflect::ops::Variant
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod field_path;
mod marshaller;
mod registry;

pub mod accessor;
pub mod array;
pub mod classify;
pub mod map;
pub mod record;
pub mod scalar;
pub mod union;

// -----------------------------------------------------------------------------
// Exports

pub use classify::FieldClass;
pub use error::MarshalError;
pub use marshaller::Marshaller;
pub use registry::{CustomConverter, CustomDeserializer, Registry, RegistryBuilder};
