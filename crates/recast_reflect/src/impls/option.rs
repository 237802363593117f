use crate::impls::GenericTypeDescCell;
use crate::info::{DescKind, TypeDesc, Typed};
use crate::ops::ReflectRef;
use crate::{FromReflect, Reflect};

// `None` is the absent value, `Some(v)` is viewed as `v` itself.
impl<T: FromReflect + Typed> Typed for Option<T> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| TypeDesc::new::<Self>(DescKind::Optional(T::type_desc)))
    }
}

impl<T: FromReflect + Typed> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => value.reflect_ref(),
            None => ReflectRef::Absent,
        }
    }
}

impl<T: FromReflect + Typed> FromReflect for Option<T> {
    fn take_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        match value.take::<Self>() {
            Ok(option) => Ok(option),
            Err(value) => T::take_reflect(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{FromReflect, Reflect};
    use crate::ops::ReflectRef;

    #[test]
    fn some_is_transparent() {
        let value = Some(3_i16);
        assert!(matches!(value.reflect_ref(), ReflectRef::Scalar(_)));
        // The static type is still the option.
        assert!(value.as_reflect().is::<Option<i16>>());
    }

    #[test]
    fn take_reflect_wraps_the_payload() {
        let nested = <Option<Option<String>>>::take_reflect(String::from("x").into_boxed_reflect());
        assert_eq!(nested.unwrap(), Some(Some(String::from("x"))));

        let none = <Option<i8>>::take_reflect(None::<i8>.into_boxed_reflect());
        assert_eq!(none.unwrap(), None);
    }
}
