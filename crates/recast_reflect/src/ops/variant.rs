use core::fmt;

use crate::impls::NonGenericTypeDescCell;
use crate::info::{DescKind, TypeDesc, Typed};
use crate::ops::ReflectRef;
use crate::{FromReflect, Reflect};

/// A holder for at most one value of any reflected type.
///
/// `Variant` is the native counterpart of a Record variant union: a field
/// typed `Variant` may hold a scalar, a record or a record array, chosen at
/// runtime. An empty `Variant` becomes an empty union.
///
/// # Examples
///
/// ```
/// use recast_reflect::{FromReflect, Reflect, ops::Variant};
///
/// let mut variant = Variant::new(5_i64);
/// assert_eq!(variant.downcast_ref::<i64>(), Some(&5));
///
/// variant.set(String::from("five"));
/// assert!(variant.get().unwrap().is::<String>());
///
/// // Any value converts into a variant holding it.
/// let wrapped = Variant::take_reflect(true.into_boxed_reflect()).unwrap();
/// assert_eq!(wrapped.downcast_ref::<bool>(), Some(&true));
///
/// assert!(Variant::empty().is_empty());
/// ```
#[derive(Default)]
pub struct Variant(Option<Box<dyn Reflect>>);

impl Variant {
    /// Creates a `Variant` holding `value`.
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(Some(value))
    }

    /// Creates an empty `Variant`.
    #[inline]
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    /// Replaces the held value, returning the previous one.
    #[inline]
    pub fn set<T: Reflect>(&mut self, value: T) -> Option<Box<dyn Reflect>> {
        self.0.replace(Box::new(value))
    }

    #[inline]
    pub fn set_boxed(&mut self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        self.0.replace(value)
    }

    /// Takes the held value out, leaving the `Variant` empty.
    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Downcasts the held value.
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    #[inline]
    pub fn into_inner(self) -> Option<Box<dyn Reflect>> {
        self.0
    }
}

impl Typed for Variant {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| TypeDesc::new::<Self>(DescKind::Variant))
    }
}

impl Reflect for Variant {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Variant(self)
    }
}

impl FromReflect for Variant {
    fn take_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        match value.take::<Self>() {
            Ok(variant) => Ok(variant),
            Err(value) => Ok(Self::from_boxed(value)),
        }
    }
}

impl fmt::Debug for Variant {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
