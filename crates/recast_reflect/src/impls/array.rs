use crate::impls::GenericTypeDescCell;
use crate::info::{ArrayDesc, DescKind, TypeDesc, Typed};
use crate::ops::{Array, ReflectRef};
use crate::{FromReflect, Reflect};

/// Converts every item to `T`, handing all items back if one fails.
///
/// Items converted before the failure come back as `T`.
fn take_items<T: FromReflect>(items: Vec<Box<dyn Reflect>>) -> Result<Vec<T>, Vec<Box<dyn Reflect>>> {
    let mut values = Vec::with_capacity(items.len());
    let mut items = items.into_iter();
    while let Some(item) = items.next() {
        match T::take_reflect(item) {
            Ok(value) => values.push(value),
            Err(item) => {
                let mut back: Vec<Box<dyn Reflect>> = values
                    .into_iter()
                    .map(|v: T| Box::new(v) as Box<dyn Reflect>)
                    .collect();
                back.push(item);
                back.extend(items);
                return Err(back);
            }
        }
    }
    Ok(values)
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: FromReflect + Typed, const N: usize> Typed for [T; N] {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDesc::new::<Self>(DescKind::Array(ArrayDesc::new(
                T::type_desc,
                Some(N),
                fixed_from_items::<T, N>,
            )))
        })
    }
}

fn fixed_from_items<T: FromReflect + Typed, const N: usize>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, Vec<Box<dyn Reflect>>> {
    if items.len() != N {
        return Err(items);
    }
    let values = take_items::<T>(items)?;
    match <[T; N]>::try_from(values) {
        Ok(array) => Ok(Box::new(array)),
        Err(values) => Err(values
            .into_iter()
            .map(|v| Box::new(v) as Box<dyn Reflect>)
            .collect()),
    }
}

impl<T: FromReflect + Typed, const N: usize> Reflect for [T; N] {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }
}

impl<T: FromReflect + Typed, const N: usize> FromReflect for [T; N] {}

impl<T: FromReflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: FromReflect + Typed> Typed for Box<[T]> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDesc::new::<Self>(DescKind::Array(ArrayDesc::new(
                T::type_desc,
                None,
                boxed_from_items::<T>,
            )))
        })
    }
}

fn boxed_from_items<T: FromReflect + Typed>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, Vec<Box<dyn Reflect>>> {
    let values = take_items::<T>(items)?;
    Ok(Box::new(values.into_boxed_slice()))
}

impl<T: FromReflect + Typed> Reflect for Box<[T]> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }
}

impl<T: FromReflect + Typed> FromReflect for Box<[T]> {}

impl<T: FromReflect + Typed> Array for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn fixed_arrays_need_the_exact_length() {
        let desc = <[i32; 3] as Typed>::type_desc().as_array().unwrap();
        let items = |n: i32| (0..n).map(|v| v.into_boxed_reflect()).collect::<Vec<_>>();

        assert_eq!(desc.from_items(items(2)).unwrap_err().len(), 2);
        let array = desc.from_items(items(3)).unwrap();
        assert_eq!(array.downcast_ref::<[i32; 3]>(), Some(&[0, 1, 2]));
    }

    #[test]
    fn boxed_slices_take_any_length() {
        let desc = <Box<[String]> as Typed>::type_desc().as_array().unwrap();
        assert_eq!(desc.len(), None);

        let items = vec![String::from("a").into_boxed_reflect(), 1_i8.into_boxed_reflect()];
        assert_eq!(desc.from_items(items).unwrap_err().len(), 2);

        let empty = desc.from_items(Vec::new()).unwrap();
        assert_eq!(empty.downcast_ref::<Box<[String]>>().map(|s| s.len()), Some(0));
    }
}
