use std::collections::VecDeque;

use crate::impls::GenericTypeDescCell;
use crate::info::{DescKind, ListDesc, TypeDesc, Typed};
use crate::ops::{List, ReflectRef};
use crate::{FromReflect, Reflect};

fn new_list<L: List + Default>() -> Box<dyn List> {
    Box::new(L::default())
}

macro_rules! impl_list_desc {
    ($ty:ident) => {
        impl<T: FromReflect + Typed> Typed for $ty<T> {
            fn type_desc() -> &'static TypeDesc {
                static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDesc::new::<Self>(DescKind::List(ListDesc::new(
                        T::type_desc,
                        Some(new_list::<Self>),
                    )))
                })
            }
        }

        impl<T: FromReflect + Typed> Reflect for $ty<T> {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }
        }

        impl<T: FromReflect + Typed> FromReflect for $ty<T> {}
    };
}

impl_list_desc!(Vec);
impl_list_desc!(VecDeque);

impl<T: FromReflect + Typed> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        let value = T::take_reflect(value)?;
        Vec::push(self, value);
        Ok(())
    }
}

impl<T: FromReflect + Typed> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        let value = T::take_reflect(value)?;
        self.push_back(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn push_converts_to_the_element_type() {
        let desc = <VecDeque<Option<i64>> as Typed>::type_desc().as_list().unwrap();
        let mut list = desc.new_list().unwrap();

        list.push(4_i64.into_boxed_reflect()).unwrap();
        list.push(None::<i64>.into_boxed_reflect()).unwrap();
        assert!(list.push(true.into_boxed_reflect()).is_err());

        let list: Box<dyn Reflect> = list;
        let list = list.take::<VecDeque<Option<i64>>>().unwrap();
        assert_eq!(list, [Some(4), None]);
    }

    #[test]
    fn element_type_is_described() {
        let desc = <Vec<String> as Typed>::type_desc().as_list().unwrap();
        assert!(desc.elem().is::<String>());
        assert!(desc.new_list().unwrap().is_empty());
    }
}
