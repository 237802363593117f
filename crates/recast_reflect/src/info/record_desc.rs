use core::fmt;

use recast_utils::hash::HashMap;

use crate::info::{DescFn, TypeDesc, Typed};
use crate::ops::Object;

// -----------------------------------------------------------------------------
// FieldDesc

/// A named field of a record type.
#[derive(Clone, Copy)]
pub struct FieldDesc {
    name: &'static str,
    desc: DescFn,
}

impl fmt::Debug for FieldDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDesc")
            .field("name", &self.name)
            .field("type", &self.desc().type_name())
            .finish()
    }
}

impl FieldDesc {
    /// Describes a field called `name` of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            desc: T::type_desc,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the field.
    #[inline]
    pub fn desc(&self) -> &'static TypeDesc {
        (self.desc)()
    }
}

// -----------------------------------------------------------------------------
// RecordDesc

/// Descriptor of a struct with named fields.
///
/// Replaces setter/getter discovery: the fields listed here are exactly the
/// ones [`Object::field`] and [`Object::set_field`] accept.
///
/// A record without constructor cannot be instantiated, so it can be
/// serialized but not deserialized.
///
/// # Examples
///
/// ```
/// use recast_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Sample {
///     id: i64,
///     #[reflect(rename = "label")]
///     name: String,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
///
/// let desc = Sample::type_desc().as_record().unwrap();
/// let names: Vec<_> = desc.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["id", "label"]);
/// assert!(desc.field("label").unwrap().desc().is::<String>());
/// assert!(desc.is_constructible());
/// ```
pub struct RecordDesc {
    fields: Box<[FieldDesc]>,
    index: HashMap<&'static str, usize>,
    construct: Option<fn() -> Box<dyn Object>>,
}

impl RecordDesc {
    /// Fields must be given in declaration order.
    pub fn new(fields: impl Into<Box<[FieldDesc]>>) -> Self {
        let fields = fields.into();
        let index = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name, index))
            .collect();
        Self {
            fields,
            index,
            construct: None,
        }
    }

    /// Sets the function creating a fresh instance.
    #[inline]
    pub fn with_constructor(mut self, construct: fn() -> Box<dyn Object>) -> Self {
        self.construct = Some(construct);
        self
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldDesc> {
        self.index.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDesc> {
        self.fields.get(index)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub const fn is_constructible(&self) -> bool {
        self.construct.is_some()
    }

    /// Creates a fresh instance, `None` if the record has no constructor.
    #[inline]
    pub fn construct(&self) -> Option<Box<dyn Object>> {
        self.construct.map(|construct| construct())
    }
}

// -----------------------------------------------------------------------------
// TaggedUnionDesc

/// Descriptor of an enum: its variant names in declaration order.
pub struct TaggedUnionDesc {
    variants: Box<[&'static str]>,
}

impl TaggedUnionDesc {
    #[inline]
    pub fn new(variants: impl Into<Box<[&'static str]>>) -> Self {
        Self {
            variants: variants.into(),
        }
    }

    #[inline]
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }
}
