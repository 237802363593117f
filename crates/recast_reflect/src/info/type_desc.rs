use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{ArrayDesc, ListDesc, MapDesc, RecordDesc, TaggedUnionDesc};

/// A lazily resolved reference to another descriptor.
///
/// Usually `<T as Typed>::type_desc`.
pub type DescFn = fn() -> &'static TypeDesc;

// -----------------------------------------------------------------------------
// NativeScalar

/// The primitive native types that map to a single Record scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeScalar {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Char,
    String,
}

impl NativeScalar {
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "String",
        }
    }
}

impl fmt::Display for NativeScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// DescKind

/// The structural category of a type.
pub enum DescKind {
    /// `i8 i16 i32 i64 f32 f64 bool char String`.
    Scalar(NativeScalar),
    /// `Option<T>`; `None` is the absent value.
    Optional(DescFn),
    /// Fixed arrays: `[T; N]` and `Box<[T]>`.
    Array(ArrayDesc),
    /// Ordered sequences: `Vec<T>`, `VecDeque<T>`, `DynamicList`.
    List(ListDesc),
    /// Keyed maps: `HashMap<K, V>`, `BTreeMap<K, V>`, `DynamicMap`.
    Map(MapDesc),
    /// Structs with named fields.
    Record(RecordDesc),
    /// A [`Variant`](crate::ops::Variant) holder.
    Variant,
    /// Enums. These are regular (tagged) unions.
    TaggedUnion(TaggedUnionDesc),
    /// "Any reflected value": the element type of dynamic containers.
    Dynamic,
}

impl DescKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Optional(_) => "optional",
            Self::Array(_) => "array",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Variant => "variant",
            Self::TaggedUnion(_) => "tagged union",
            Self::Dynamic => "dynamic",
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDesc

/// The descriptor of one native type.
///
/// # Examples
///
/// ```
/// use recast_reflect::info::{DescKind, Typed};
///
/// let desc = <Option<[i16; 4]> as Typed>::type_desc();
/// let DescKind::Optional(inner) = desc.kind() else { unreachable!() };
///
/// let array = inner().as_array().unwrap();
/// assert_eq!(array.len(), Some(4));
/// assert!(desc.is::<Option<[i16; 4]>>());
/// ```
pub struct TypeDesc {
    type_id: TypeId,
    type_name: &'static str,
    kind: DescKind,
}

impl TypeDesc {
    /// Creates the descriptor of `T`, named after [`core::any::type_name`].
    pub fn new<T: Any + ?Sized>(kind: DescKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            kind,
        }
    }

    /// Overrides the type name.
    #[inline]
    pub fn with_type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full type name, e.g. `alloc::vec::Vec<i32>`.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The type name without its module path, e.g. `Vec<i32>`.
    pub fn short_name(&self) -> &'static str {
        let name = self.type_name;
        let head = name.find('<').unwrap_or(name.len());
        match name[..head].rfind("::") {
            Some(index) => &name[index + 2..],
            None => name,
        }
    }

    #[inline]
    pub const fn kind(&self) -> &DescKind {
        &self.kind
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.kind, DescKind::Dynamic)
    }

    #[inline]
    pub const fn as_scalar(&self) -> Option<NativeScalar> {
        match self.kind {
            DescKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_array(&self) -> Option<&ArrayDesc> {
        match &self.kind {
            DescKind::Array(desc) => Some(desc),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_list(&self) -> Option<&ListDesc> {
        match &self.kind {
            DescKind::List(desc) => Some(desc),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&MapDesc> {
        match &self.kind {
            DescKind::Map(desc) => Some(desc),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_record(&self) -> Option<&RecordDesc> {
        match &self.kind {
            DescKind::Record(desc) => Some(desc),
            _ => None,
        }
    }

    /// Follows `Option` wrappers down to the first non-optional descriptor.
    pub fn unwrap_optional(&'static self) -> &'static TypeDesc {
        let mut desc = self;
        while let DescKind::Optional(inner) = desc.kind {
            desc = inner();
        }
        desc
    }
}

impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeDesc {}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{DescKind, NativeScalar, Typed};

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(<Vec<i32> as Typed>::type_desc().short_name(), "Vec<i32>");
        assert_eq!(<String as Typed>::type_desc().short_name(), "String");
        assert_eq!(<dyn Reflect as Typed>::type_desc().short_name(), "dyn Reflect");
    }

    #[test]
    fn unwrap_optional_reaches_the_payload() {
        let desc = <Option<Option<char>> as Typed>::type_desc();
        assert!(matches!(desc.kind(), DescKind::Optional(_)));
        assert_eq!(desc.unwrap_optional().as_scalar(), Some(NativeScalar::Char));
    }
}
