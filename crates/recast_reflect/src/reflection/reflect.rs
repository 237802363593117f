use core::any::{Any, TypeId};
use core::fmt;

use crate::impls::NonGenericTypeDescCell;
use crate::info::{DescKind, DynamicTyped, TypeDesc, Typed};
use crate::ops::{ReflectRef, ScalarRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait of runtime reflection in [`recast_reflect`].
///
/// A `Reflect` value exposes its static [`TypeDesc`] through
/// [`DynamicTyped::reflect_type_desc`] and its current structure through
/// [`reflect_ref`](Reflect::reflect_ref). The marshaller only ever talks to
/// values through these two entry points.
///
/// It's strongly recommended to use [the derive macro] rather than
/// implementing this trait by hand.
///
/// # Identity
///
/// A boxed value answers [`Any::type_id`] with the id of the box itself.
/// [`Reflect::ty_id`] and the inherent `downcast` helpers on `dyn Reflect`
/// look through it:
///
/// ```rust
/// # use core::any::{Any, TypeId};
/// use recast_reflect::Reflect;
///
/// let boxed = String::from("id").into_boxed_reflect();
/// assert_ne!(boxed.type_id(), TypeId::of::<String>());
/// assert_eq!(boxed.ty_id(), TypeId::of::<String>());
///
/// assert!(boxed.downcast_ref::<i32>().is_none());
/// assert_eq!(boxed.take::<String>().ok().as_deref(), Some("id"));
/// ```
///
/// [`recast_reflect`]: crate
/// [the derive macro]: crate::derive::Reflect
/// [`Any`]: core::any::Any
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// `self` as a trait object.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// `Box::new(self)`, typed as `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the reflected type, never of a wrapping box.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns an immutable view of the value's structure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use recast_reflect::{Reflect, ops::ReflectRef};
    /// let vec = vec![1, 2, 3];
    /// let ReflectRef::List(list) = vec.reflect_ref() else { unreachable!() };
    /// assert_eq!(list.len(), 3);
    ///
    /// let none: Option<i32> = None;
    /// assert!(matches!(none.reflect_ref(), ReflectRef::Absent));
    /// ```
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Debug formatter for the value, driven by [`reflect_ref`](Reflect::reflect_ref).
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Scalar(value) => fmt::Debug::fmt(&value, f),
            ReflectRef::Array(array) => f.debug_list().entries(array.iter()).finish(),
            ReflectRef::List(list) => f.debug_list().entries(list.iter()).finish(),
            ReflectRef::Map(map) => f.debug_map().entries(map.iter()).finish(),
            ReflectRef::Object(object) => {
                let mut debug = f.debug_struct(self.reflect_type_desc().short_name());
                for (name, value) in object.iter_fields() {
                    debug.field(name, &value);
                }
                debug.finish()
            }
            ReflectRef::Variant(variant) => match variant.get() {
                Some(value) => f.debug_tuple("Variant").field(&value).finish(),
                None => f.write_str("Variant(<empty>)"),
            },
            ReflectRef::TaggedUnion(union) => write!(
                f,
                "{}::{}",
                self.reflect_type_desc().short_name(),
                union.variant_name()
            ),
            ReflectRef::Absent => f.write_str("None"),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Returns the scalar view of this value, if it is a scalar.
    #[inline]
    pub fn as_scalar(&self) -> Option<ScalarRef<'_>> {
        match self.reflect_ref() {
            ReflectRef::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl Typed for dyn Reflect {
    /// The descriptor of "any reflected value", i.e. [`DescKind::Dynamic`].
    ///
    /// This is not the descriptor of the underlying data,
    /// use [`DynamicTyped::reflect_type_desc`] for that.
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| TypeDesc::new::<Self>(DescKind::Dynamic).with_type_name("dyn Reflect"))
    }
}
