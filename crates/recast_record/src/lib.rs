//! A self-describing structured value.
//!
//! A [`Record`] is an ordered list of uniquely named fields plus an optional
//! type identifier. The layout is fixed by an immutable [`Shape`], built once
//! through a [`ShapeBuilder`], and every field keeps the [`FieldKind`] it was
//! declared with.
//!
//! ```
//! use recast_record::{Record, Scalar, ScalarKind, Shape};
//!
//! let mut builder = Shape::builder();
//! builder.set_id("Point");
//! builder.add_scalar("x", ScalarKind::Int).unwrap();
//! builder.add_scalar("y", ScalarKind::Int).unwrap();
//! let shape = builder.build();
//!
//! let mut record = Record::new(&shape);
//! record.put_scalar("x", Scalar::Int(3)).unwrap();
//!
//! assert_eq!(record.id(), Some("Point"));
//! assert_eq!(record.get_scalar("x").unwrap(), &Scalar::Int(3));
//! assert_eq!(record.get_scalar("y").unwrap(), &Scalar::Int(0));
//! ```
//!
//! Array fields are read and written through windows of at most
//! [`CHUNK_LEN`] elements, callers loop until the whole array is transferred.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod record;
mod scalar;
mod shape;
mod union;

// -----------------------------------------------------------------------------
// Exports

pub use error::RecordError;
pub use record::{ArrayChunk, CHUNK_LEN, Record};
pub use scalar::{Scalar, ScalarArray, ScalarKind, ScalarSlice};
pub use shape::{FieldDef, FieldKind, FieldType, Shape, ShapeBuilder, UnionType};
pub use union::{Union, UnionValue};
