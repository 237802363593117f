//! Containers for static storage of [`TypeDesc`].
//!
//! These are used to implement [`Typed`](crate::info::Typed).
//!
//! For non-generic types, [`NonGenericTypeDescCell`] wraps a [`OnceLock`].
//!
//! For generic types, the `static CELL` inside `type_desc` is shared by every
//! instantiation, so [`GenericTypeDescCell`] keeps one leaked descriptor per
//! [`TypeId`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use recast_utils::TypeIdMap;

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// NonGenericTypeDescCell

/// Container for the static descriptor of a non-generic type.
///
/// # Examples
///
/// ```
/// use recast_reflect::impls::NonGenericTypeDescCell;
/// use recast_reflect::info::{DescKind, TypeDesc, Typed};
///
/// struct Marker;
///
/// impl Typed for Marker {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
///         CELL.get_or_init(|| TypeDesc::new::<Marker>(DescKind::Variant))
///     }
/// }
///
/// assert!(core::ptr::eq(Marker::type_desc(), Marker::type_desc()));
/// ```
pub struct NonGenericTypeDescCell(OnceLock<TypeDesc>);

impl NonGenericTypeDescCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, creating it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDesc) -> &TypeDesc {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeDescCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeDescCell

/// Container for the static descriptors of a generic type.
///
/// # Examples
///
/// ```
/// use recast_reflect::impls::GenericTypeDescCell;
/// use recast_reflect::info::{DescKind, TypeDesc, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: 'static> Typed for Tagged<T> {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
///         CELL.get_or_insert::<Self>(|| TypeDesc::new::<Self>(DescKind::Variant))
///     }
/// }
///
/// assert!(Tagged::<u8>::type_desc().is::<Tagged<u8>>());
/// assert!(Tagged::<i64>::type_desc().is::<Tagged<i64>>());
/// ```
pub struct GenericTypeDescCell(RwLock<TypeIdMap<&'static TypeDesc>>);

impl GenericTypeDescCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, creating it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeDesc) -> &'static TypeDesc {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> TypeDesc) -> &'static TypeDesc {
        match self.get_by_type_id(type_id) {
            Some(desc) => desc,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeDesc> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing writer may have inserted first, its descriptor wins.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, desc: TypeDesc) -> &'static TypeDesc {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(desc)))
    }
}

impl Default for GenericTypeDescCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
