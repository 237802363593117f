use core::any::TypeId;
use core::fmt;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;

// -----------------------------------------------------------------------------
// TypeIdMap

/// Per-type table keyed by [`TypeId`].
///
/// Keys are stored as-is through [`NoOpHashState`]: a `TypeId` is already a
/// hash.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use recast_utils::TypeIdMap;
///
/// let mut names = TypeIdMap::new();
/// names.insert_type::<i32>("Int");
///
/// assert_eq!(names.get(&TypeId::of::<i32>()), Some(&"Int"));
/// assert_eq!(names.get(&TypeId::of::<i64>()), None);
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Stores `value` for `T`, returning the value it replaces.
    #[inline]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, value: V) -> Option<V> {
        self.0.insert(TypeId::of::<T>(), value)
    }

    /// Returns the value of `type_id`, storing `make()` first when there is
    /// none.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, make: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(make)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values in unspecified order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.values()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn insert_replaces_previous_value() {
        let mut map = TypeIdMap::new();
        assert!(map.insert_type::<String>(1).is_none());
        assert_eq!(map.insert_type::<String>(2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&TypeId::of::<String>()), Some(&2));
    }

    #[test]
    fn get_or_insert_makes_the_value_once() {
        let mut map = TypeIdMap::new();
        let mut calls = 0;
        for _ in 0..3 {
            map.get_or_insert(TypeId::of::<u8>(), || {
                calls += 1;
                "u8"
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(map.values().collect::<Vec<_>>(), [&"u8"]);
    }
}
