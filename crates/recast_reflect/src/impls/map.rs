use core::hash::{BuildHasher, Hash};
use std::collections::BTreeMap;

use crate::impls::GenericTypeDescCell;
use crate::info::{DescKind, MapDesc, TypeDesc, Typed};
use crate::ops::{Map, MapIter, ReflectRef};
use crate::{FromReflect, Reflect};

fn new_map<M: Map + Default>() -> Box<dyn Map> {
    Box::new(M::default())
}

/// Converts an entry to `(K, V)`, handing both back if either fails.
fn take_entry<K: FromReflect, V: FromReflect>(
    key: Box<dyn Reflect>,
    value: Box<dyn Reflect>,
) -> Result<(K, V), (Box<dyn Reflect>, Box<dyn Reflect>)> {
    let key = match K::take_reflect(key) {
        Ok(key) => key,
        Err(key) => return Err((key, value)),
    };
    match V::take_reflect(value) {
        Ok(value) => Ok((key, value)),
        Err(value) => Err((key.into_boxed_reflect(), value)),
    }
}

macro_rules! impl_reflect_hash_map {
    ($($map:ident)::+) => {
        impl<K, V, S> Typed for $($map)::+<K, V, S>
        where
            K: FromReflect + Typed + Eq + Hash,
            V: FromReflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_desc() -> &'static TypeDesc {
                static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDesc::new::<Self>(DescKind::Map(MapDesc::new(
                        K::type_desc,
                        V::type_desc,
                        Some(new_map::<Self>),
                    )))
                })
            }
        }

        impl<K, V, S> Reflect for $($map)::+<K, V, S>
        where
            K: FromReflect + Typed + Eq + Hash,
            V: FromReflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }
        }

        impl<K, V, S> FromReflect for $($map)::+<K, V, S>
        where
            K: FromReflect + Typed + Eq + Hash,
            V: FromReflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
        }

        impl<K, V, S> Map for $($map)::+<K, V, S>
        where
            K: FromReflect + Typed + Eq + Hash,
            V: FromReflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $($map)::+::len(self)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new(
                    $($map)::+::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())),
                )
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                let (key, value) = take_entry::<K, V>(key, value)?;
                $($map)::+::insert(self, key, value);
                Ok(())
            }
        }
    };
}

impl_reflect_hash_map!(std::collections::HashMap);
impl_reflect_hash_map!(recast_utils::hash::hashbrown::HashMap);

// -----------------------------------------------------------------------------
// BTreeMap

impl<K, V> Typed for BTreeMap<K, V>
where
    K: FromReflect + Typed + Ord,
    V: FromReflect + Typed,
{
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDesc::new::<Self>(DescKind::Map(MapDesc::new(
                K::type_desc,
                V::type_desc,
                Some(new_map::<Self>),
            )))
        })
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: FromReflect + Typed + Ord,
    V: FromReflect + Typed,
{
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }
}

impl<K, V> FromReflect for BTreeMap<K, V>
where
    K: FromReflect + Typed + Ord,
    V: FromReflect + Typed,
{
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: FromReflect + Typed + Ord,
    V: FromReflect + Typed,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let (key, value) = take_entry::<K, V>(key, value)?;
        BTreeMap::insert(self, key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use recast_utils::hash::HashMap;

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Map;

    #[test]
    fn btree_map_iterates_in_key_order() {
        let map = BTreeMap::from([(String::from("b"), 2_i32), (String::from("a"), 1)]);
        let keys: Vec<&String> = Map::iter(&map)
            .map(|(k, _)| k.downcast_ref::<String>().unwrap())
            .collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(Map::get(&map, "b").unwrap().downcast_ref::<i32>(), Some(&2));
    }

    #[test]
    fn insert_checks_key_and_value_types() {
        let desc = <HashMap<String, bool> as Typed>::type_desc().as_map().unwrap();
        assert!(desc.key().is::<String>());

        let mut map = desc.new_map().unwrap();
        map.insert(String::from("on").into_boxed_reflect(), true.into_boxed_reflect())
            .unwrap();
        let (key, _) = map
            .insert(String::from("off").into_boxed_reflect(), 0_i8.into_boxed_reflect())
            .unwrap_err();
        assert_eq!(key.downcast_ref::<String>().map(String::as_str), Some("off"));
        assert_eq!(map.len(), 1);
    }
}
