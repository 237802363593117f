use crate::Reflect;

/// A trait that enables types to be constructed from a boxed reflected value.
///
/// The marshaller builds every value with the exact type its descriptor
/// names, so the default implementation is a plain downcast. Types that
/// wrap another type, like [`Option<T>`] or [`Variant`], also accept the
/// wrapped value.
///
/// On failure, the input is handed back unchanged.
///
/// # Examples
///
/// ```
/// use recast_reflect::{FromReflect, Reflect};
///
/// let boxed = 7_i64.into_boxed_reflect();
/// assert_eq!(<Option<i64>>::take_reflect(boxed).unwrap(), Some(7));
///
/// let boxed = 7_i64.into_boxed_reflect();
/// assert!(bool::take_reflect(boxed).is_err());
/// ```
///
/// [`Variant`]: crate::ops::Variant
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `FromReflect` so cannot be created through reflection",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait FromReflect: Reflect + Sized {
    /// Unboxes `value` as `Self`.
    #[inline]
    fn take_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}
