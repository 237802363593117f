use crate::impls::NonGenericTypeDescCell;
use crate::info::{DescKind, NativeScalar, TypeDesc, Typed};
use crate::ops::{ReflectRef, ScalarRef};
use crate::{FromReflect, Reflect};

macro_rules! impl_native_scalar {
    ($ty:ty, $native:ident, |$this:ident| $scalar:expr) => {
        impl Typed for $ty {
            fn type_desc() -> &'static TypeDesc {
                static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
                CELL.get_or_init(|| TypeDesc::new::<$ty>(DescKind::Scalar(NativeScalar::$native)))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                let $this = self;
                ReflectRef::Scalar($scalar)
            }
        }

        impl FromReflect for $ty {}
    };
}

impl_native_scalar!(i8, I8, |v| ScalarRef::I8(*v));
impl_native_scalar!(i16, I16, |v| ScalarRef::I16(*v));
impl_native_scalar!(i32, I32, |v| ScalarRef::I32(*v));
impl_native_scalar!(i64, I64, |v| ScalarRef::I64(*v));
impl_native_scalar!(f32, F32, |v| ScalarRef::F32(*v));
impl_native_scalar!(f64, F64, |v| ScalarRef::F64(*v));
impl_native_scalar!(bool, Bool, |v| ScalarRef::Bool(*v));
impl_native_scalar!(char, Char, |v| ScalarRef::Char(*v));
impl_native_scalar!(String, String, |v| ScalarRef::Str(v.as_str()));

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{NativeScalar, Typed};
    use crate::ops::ScalarRef;

    #[test]
    fn scalars_expose_their_value() {
        let name = String::from("recast");
        assert_eq!(name.as_reflect().as_scalar(), Some(ScalarRef::Str("recast")));
        assert_eq!('Q'.as_reflect().as_scalar(), Some(ScalarRef::Char('Q')));
        assert_eq!(
            <f32 as Typed>::type_desc().as_scalar(),
            Some(NativeScalar::F32)
        );
    }
}
