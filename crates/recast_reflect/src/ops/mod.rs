//! Capability traits for the structural kinds of [`ReflectRef`], plus the
//! dynamic containers used when no concrete type is known.

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod list_ops;
mod map_ops;
mod object_ops;
mod reflect_ref;
mod tagged_ops;
mod variant;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::{Array, ArrayItemIter};
pub use list_ops::{DynamicList, List, ListItemIter};
pub use map_ops::{DynamicMap, Map, MapIter};
pub use object_ops::{FieldIter, Object};
pub use reflect_ref::{ReflectRef, ScalarRef};
pub use tagged_ops::TaggedUnion;
pub use variant::Variant;
