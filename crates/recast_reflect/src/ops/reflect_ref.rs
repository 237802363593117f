use core::fmt;

use crate::info::NativeScalar;
use crate::ops::{Array, List, Map, Object, TaggedUnion, Variant};

// -----------------------------------------------------------------------------
// ScalarRef

/// A borrowed native scalar.
#[derive(Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    Str(&'a str),
}

impl ScalarRef<'_> {
    pub const fn native(&self) -> NativeScalar {
        match self {
            Self::I8(_) => NativeScalar::I8,
            Self::I16(_) => NativeScalar::I16,
            Self::I32(_) => NativeScalar::I32,
            Self::I64(_) => NativeScalar::I64,
            Self::F32(_) => NativeScalar::F32,
            Self::F64(_) => NativeScalar::F64,
            Self::Bool(_) => NativeScalar::Bool,
            Self::Char(_) => NativeScalar::Char,
            Self::Str(_) => NativeScalar::String,
        }
    }
}

impl fmt::Debug for ScalarRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => fmt::Debug::fmt(v, f),
            Self::I16(v) => fmt::Debug::fmt(v, f),
            Self::I32(v) => fmt::Debug::fmt(v, f),
            Self::I64(v) => fmt::Debug::fmt(v, f),
            Self::F32(v) => fmt::Debug::fmt(v, f),
            Self::F64(v) => fmt::Debug::fmt(v, f),
            Self::Bool(v) => fmt::Debug::fmt(v, f),
            Self::Char(v) => fmt::Debug::fmt(v, f),
            Self::Str(v) => fmt::Debug::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of the structural kinds of a value.
///
/// Returned by [`Reflect::reflect_ref`](crate::Reflect::reflect_ref).
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Scalar(ScalarRef<'a>),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Object(&'a dyn Object),
    Variant(&'a Variant),
    TaggedUnion(&'a dyn TaggedUnion),
    /// The native "no value", e.g. `None`.
    Absent,
}

impl<'a> ReflectRef<'a> {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Variant(_) => "variant",
            Self::TaggedUnion(_) => "tagged union",
            Self::Absent => "absent",
        }
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn as_object(self) -> Option<&'a dyn Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_list(self) -> Option<&'a dyn List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(self) -> Option<&'a dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}
