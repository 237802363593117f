use crate::info::TypeDesc;

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// Implementations store the descriptor in a static cell, see
/// [`NonGenericTypeDescCell`](crate::impls::NonGenericTypeDescCell) and
/// [`GenericTypeDescCell`](crate::impls::GenericTypeDescCell).
///
/// # Examples
///
/// ```
/// use recast_reflect::info::{DescKind, NativeScalar, Typed};
///
/// let desc = <Vec<f32> as Typed>::type_desc();
/// let list = desc.as_list().unwrap();
/// assert!(matches!(list.elem().kind(), DescKind::Scalar(NativeScalar::F32)));
/// ```
pub trait Typed: 'static {
    /// Returns the compile-time descriptor of the type.
    fn type_desc() -> &'static TypeDesc;
}

/// Dynamic dispatch for [`Typed`].
///
/// Blanket implemented for every [`Typed`] type, and a supertrait of
/// [`Reflect`](crate::Reflect).
pub trait DynamicTyped {
    /// See [`Typed::type_desc`].
    fn reflect_type_desc(&self) -> &'static TypeDesc;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_desc(&self) -> &'static TypeDesc {
        T::type_desc()
    }
}
