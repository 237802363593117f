use core::fmt;

use recast_utils::hash::HashMap;

use crate::impls::NonGenericTypeDescCell;
use crate::info::{DescKind, MapDesc, TypeDesc, Typed};
use crate::ops::ReflectRef;
use crate::{FromReflect, Reflect};

/// A boxed iterator over the `(key, value)` entries of a [`Map`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

// -----------------------------------------------------------------------------
// Map

/// A keyed collection: `HashMap<K, V>`, `BTreeMap<K, V>` or [`DynamicMap`].
///
/// Only maps keyed by `String` can become Records, but the trait itself
/// accepts any reflected key type so that the marshaller can report the
/// offending key type.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in the map's native order.
    fn iter(&self) -> MapIter<'_>;

    /// Returns the value stored under the string key `key`.
    ///
    /// The default implementation scans [`iter`](Map::iter).
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        self.iter()
            .find(|(k, _)| k.downcast_ref::<String>().is_some_and(|k| k == key))
            .map(|(_, v)| v)
    }

    /// Inserts an entry, converting key and value to the map's types.
    ///
    /// Both are returned unchanged if either cannot be converted.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;
}

// -----------------------------------------------------------------------------
// DynamicMap

/// An insertion-ordered, string-keyed map holding values of any reflected type.
///
/// This is the default ordered map and the result of deserializing a Record
/// without a known target type.
///
/// # Examples
///
/// ```
/// use recast_reflect::ops::{DynamicMap, Map};
///
/// let mut map = DynamicMap::new();
/// map.insert_value("size", 3_i32);
/// map.insert_value("kind", String::from("Widget"));
/// map.insert_value("size", 4_i32);
///
/// let keys: Vec<_> = map.keys().collect();
/// assert_eq!(keys, ["size", "kind"]);
/// assert_eq!(map.get_as::<i32>("size"), Some(&4));
/// assert!(Map::get(&map, "kind").unwrap().is::<String>());
/// ```
#[derive(Default)]
pub struct DynamicMap {
    entries: Vec<(String, Box<dyn Reflect>)>,
    index: HashMap<String, usize>,
}

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a boxed value, returning the value it replaced.
    ///
    /// Replacing keeps the key at its original position.
    pub fn insert_boxed(&mut self, key: impl Into<String>, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Inserts a value, returning the value it replaced.
    #[inline]
    pub fn insert_value<T: Reflect>(&mut self, key: impl Into<String>, value: T) -> Option<Box<dyn Reflect>> {
        self.insert_boxed(key, Box::new(value))
    }

    #[inline]
    pub fn get_value(&self, key: &str) -> Option<&dyn Reflect> {
        self.index.get(key).map(|&index| &*self.entries[index].1)
    }

    /// Downcasts the value stored under `key`.
    #[inline]
    pub fn get_as<T: Reflect>(&self, key: &str) -> Option<&T> {
        self.get_value(key)?.downcast_ref::<T>()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Consumes the map, returning its entries in insertion order.
    #[inline]
    pub fn into_entries(self) -> Vec<(String, Box<dyn Reflect>)> {
        self.entries
    }
}

impl Typed for DynamicMap {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::new::<Self>(DescKind::Map(MapDesc::new(
                <String as Typed>::type_desc,
                <dyn Reflect as Typed>::type_desc,
                Some(new_dynamic_map),
            )))
        })
    }
}

fn new_dynamic_map() -> Box<dyn Map> {
    Box::new(DynamicMap::new())
}

impl Reflect for DynamicMap {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }
}

impl FromReflect for DynamicMap {}

impl Map for DynamicMap {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(k, v)| (k as &dyn Reflect, &**v)),
        )
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        self.get_value(key)
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let key = match key.take::<String>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        // A replaced value is dropped, the position of the key is kept.
        self.insert_boxed(key, value);
        Ok(())
    }
}

impl fmt::Debug for DynamicMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicMap;
    use crate::Reflect;
    use crate::ops::Map;

    #[test]
    fn insert_rejects_non_string_keys() {
        let mut map = DynamicMap::new();
        let (key, value) = Map::insert(&mut map, 1_i32.into_boxed_reflect(), true.into_boxed_reflect())
            .unwrap_err();
        assert!(key.is::<i32>());
        assert!(value.is::<bool>());
        assert!(map.is_empty());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = DynamicMap::new();
        for (i, key) in ["c", "a", "b"].into_iter().enumerate() {
            map.insert_value(key, i as i64);
        }
        let keys: Vec<String> = Map::iter(&map)
            .map(|(k, _)| k.downcast_ref::<String>().unwrap().clone())
            .collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }
}
