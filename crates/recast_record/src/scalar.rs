use core::fmt;

use crate::RecordError;

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive kinds a scalar field can hold.
///
/// A single character has no kind of its own, it is stored as a one
/// character [`String`](ScalarKind::String).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
}

impl ScalarKind {
    /// All kinds, in declaration order.
    pub const ALL: [ScalarKind; 8] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::String,
    ];

    /// Returns `true` for `Byte`, `Short`, `Int` and `Long`.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// Returns `true` for `Float` and `Double`.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// A lowercase name, e.g. `"int32"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "int8",
            Self::Short => "int16",
            Self::Int => "int32",
            Self::Long => "int64",
            Self::Float => "float32",
            Self::Double => "float64",
            Self::Boolean => "bool",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// One owned scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl Scalar {
    /// The zero value of `kind`: `0`, `0.0`, `false` or an empty string.
    pub fn default_of(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Byte => Self::Byte(0),
            ScalarKind::Short => Self::Short(0),
            ScalarKind::Int => Self::Int(0),
            ScalarKind::Long => Self::Long(0),
            ScalarKind::Float => Self::Float(0.0),
            ScalarKind::Double => Self::Double(0.0),
            ScalarKind::Boolean => Self::Boolean(false),
            ScalarKind::String => Self::String(String::new()),
        }
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Byte(_) => ScalarKind::Byte,
            Self::Short(_) => ScalarKind::Short,
            Self::Int(_) => ScalarKind::Int,
            Self::Long(_) => ScalarKind::Long,
            Self::Float(_) => ScalarKind::Float,
            Self::Double(_) => ScalarKind::Double,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Widens any integer kind to `i64`.
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Byte(v) => Some(v as i64),
            Self::Short(v) => Some(v as i64),
            Self::Int(v) => Some(v as i64),
            Self::Long(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => fmt::Display::fmt(v, f),
            Self::Short(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Long(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Double(v) => fmt::Display::fmt(v, f),
            Self::Boolean(v) => fmt::Display::fmt(v, f),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarArray / ScalarSlice

/// An owned homogeneous array of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArray {
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Boolean(Vec<bool>),
    String(Vec<String>),
}

/// A borrowed window into a homogeneous array of scalars.
///
/// This is the unit of transfer of the chunked array primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarSlice<'a> {
    Byte(&'a [i8]),
    Short(&'a [i16]),
    Int(&'a [i32]),
    Long(&'a [i64]),
    Float(&'a [f32]),
    Double(&'a [f64]),
    Boolean(&'a [bool]),
    String(&'a [String]),
}

macro_rules! each_variant {
    ($ty:ident, $value:expr, $inner:ident => $body:expr) => {
        match $value {
            $ty::Byte($inner) => $body,
            $ty::Short($inner) => $body,
            $ty::Int($inner) => $body,
            $ty::Long($inner) => $body,
            $ty::Float($inner) => $body,
            $ty::Double($inner) => $body,
            $ty::Boolean($inner) => $body,
            $ty::String($inner) => $body,
        }
    };
}

macro_rules! variant_kind {
    ($ty:ident, $value:expr) => {
        match $value {
            $ty::Byte(_) => ScalarKind::Byte,
            $ty::Short(_) => ScalarKind::Short,
            $ty::Int(_) => ScalarKind::Int,
            $ty::Long(_) => ScalarKind::Long,
            $ty::Float(_) => ScalarKind::Float,
            $ty::Double(_) => ScalarKind::Double,
            $ty::Boolean(_) => ScalarKind::Boolean,
            $ty::String(_) => ScalarKind::String,
        }
    };
}

macro_rules! element_at {
    ($ty:ident, $value:expr, $index:expr) => {
        match $value {
            $ty::Byte(v) => v.get($index).copied().map(Scalar::Byte),
            $ty::Short(v) => v.get($index).copied().map(Scalar::Short),
            $ty::Int(v) => v.get($index).copied().map(Scalar::Int),
            $ty::Long(v) => v.get($index).copied().map(Scalar::Long),
            $ty::Float(v) => v.get($index).copied().map(Scalar::Float),
            $ty::Double(v) => v.get($index).copied().map(Scalar::Double),
            $ty::Boolean(v) => v.get($index).copied().map(Scalar::Boolean),
            $ty::String(v) => v.get($index).cloned().map(Scalar::String),
        }
    };
}

impl ScalarArray {
    /// An empty array of `kind`.
    pub const fn empty(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Byte => Self::Byte(Vec::new()),
            ScalarKind::Short => Self::Short(Vec::new()),
            ScalarKind::Int => Self::Int(Vec::new()),
            ScalarKind::Long => Self::Long(Vec::new()),
            ScalarKind::Float => Self::Float(Vec::new()),
            ScalarKind::Double => Self::Double(Vec::new()),
            ScalarKind::Boolean => Self::Boolean(Vec::new()),
            ScalarKind::String => Self::String(Vec::new()),
        }
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        variant_kind!(ScalarArray, self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        each_variant!(ScalarArray, self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        element_at!(ScalarArray, self, index)
    }

    /// Borrows the elements in `start..end`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> ScalarSlice<'_> {
        match self {
            Self::Byte(v) => ScalarSlice::Byte(&v[start..end]),
            Self::Short(v) => ScalarSlice::Short(&v[start..end]),
            Self::Int(v) => ScalarSlice::Int(&v[start..end]),
            Self::Long(v) => ScalarSlice::Long(&v[start..end]),
            Self::Float(v) => ScalarSlice::Float(&v[start..end]),
            Self::Double(v) => ScalarSlice::Double(&v[start..end]),
            Self::Boolean(v) => ScalarSlice::Boolean(&v[start..end]),
            Self::String(v) => ScalarSlice::String(&v[start..end]),
        }
    }

    /// Borrows the whole array.
    #[inline]
    pub fn as_slice(&self) -> ScalarSlice<'_> {
        self.slice(0, self.len())
    }

    /// Appends one scalar of the same kind.
    ///
    /// Returns the value back if its kind differs from the array's.
    pub fn push(&mut self, value: Scalar) -> Result<(), Scalar> {
        match (self, value) {
            (Self::Byte(v), Scalar::Byte(x)) => v.push(x),
            (Self::Short(v), Scalar::Short(x)) => v.push(x),
            (Self::Int(v), Scalar::Int(x)) => v.push(x),
            (Self::Long(v), Scalar::Long(x)) => v.push(x),
            (Self::Float(v), Scalar::Float(x)) => v.push(x),
            (Self::Double(v), Scalar::Double(x)) => v.push(x),
            (Self::Boolean(v), Scalar::Boolean(x)) => v.push(x),
            (Self::String(v), Scalar::String(x)) => v.push(x),
            (_, value) => return Err(value),
        }
        Ok(())
    }

    /// Overwrites the elements starting at `offset` with `src`, growing the
    /// array when `src` runs past its end.
    ///
    /// `field` is only used to describe failures.
    pub(crate) fn write_at(
        &mut self,
        field: &str,
        offset: usize,
        src: ScalarSlice<'_>,
    ) -> Result<(), RecordError> {
        let len = self.len();
        if offset > len {
            return Err(RecordError::OutOfBounds {
                field: field.to_owned(),
                offset,
                len,
            });
        }
        match (self, src) {
            (Self::Byte(dst), ScalarSlice::Byte(src)) => splice(dst, offset, src),
            (Self::Short(dst), ScalarSlice::Short(src)) => splice(dst, offset, src),
            (Self::Int(dst), ScalarSlice::Int(src)) => splice(dst, offset, src),
            (Self::Long(dst), ScalarSlice::Long(src)) => splice(dst, offset, src),
            (Self::Float(dst), ScalarSlice::Float(src)) => splice(dst, offset, src),
            (Self::Double(dst), ScalarSlice::Double(src)) => splice(dst, offset, src),
            (Self::Boolean(dst), ScalarSlice::Boolean(src)) => splice(dst, offset, src),
            (Self::String(dst), ScalarSlice::String(src)) => splice(dst, offset, src),
            (dst, src) => {
                return Err(RecordError::KindMismatch {
                    field: field.to_owned(),
                    declared: array_name(dst.kind()),
                    requested: array_name(src.kind()),
                });
            }
        }
        Ok(())
    }
}

impl<'a> ScalarSlice<'a> {
    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        variant_kind!(ScalarSlice, self)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        each_variant!(ScalarSlice, self, v => v.len())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        element_at!(ScalarSlice, self, index)
    }

    /// Narrows the window to at most `len` leading elements.
    pub fn truncate(self, len: usize) -> Self {
        let len = len.min(self.len());
        match self {
            Self::Byte(v) => Self::Byte(&v[..len]),
            Self::Short(v) => Self::Short(&v[..len]),
            Self::Int(v) => Self::Int(&v[..len]),
            Self::Long(v) => Self::Long(&v[..len]),
            Self::Float(v) => Self::Float(&v[..len]),
            Self::Double(v) => Self::Double(&v[..len]),
            Self::Boolean(v) => Self::Boolean(&v[..len]),
            Self::String(v) => Self::String(&v[..len]),
        }
    }

    /// Copies the window into an owned array.
    pub fn to_array(&self) -> ScalarArray {
        match *self {
            Self::Byte(v) => ScalarArray::Byte(v.to_vec()),
            Self::Short(v) => ScalarArray::Short(v.to_vec()),
            Self::Int(v) => ScalarArray::Int(v.to_vec()),
            Self::Long(v) => ScalarArray::Long(v.to_vec()),
            Self::Float(v) => ScalarArray::Float(v.to_vec()),
            Self::Double(v) => ScalarArray::Double(v.to_vec()),
            Self::Boolean(v) => ScalarArray::Boolean(v.to_vec()),
            Self::String(v) => ScalarArray::String(v.to_vec()),
        }
    }

    /// Iterates over copies of the elements.
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + 'a {
        let this = *self;
        (0..this.len()).filter_map(move |index| this.get(index))
    }
}

fn splice<T: Clone>(dst: &mut Vec<T>, offset: usize, src: &[T]) {
    let overlap = (dst.len() - offset).min(src.len());
    dst[offset..offset + overlap].clone_from_slice(&src[..overlap]);
    dst.extend_from_slice(&src[overlap..]);
}

fn array_name(kind: ScalarKind) -> String {
    format!("{kind} array")
}
