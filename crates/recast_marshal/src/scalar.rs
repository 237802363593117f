//! Conversion of single scalar values.
//!
//! Record data widens freely inside its family: any integer can be read into
//! any signed integer it fits in, or into a float that holds it exactly.
//! A double is read into `f32` when it is within `f32` range, rounded to the
//! nearest `f32`. Floats, booleans and strings only go to their own family,
//! and a `char` needs a string of exactly one character.

use recast_record::Scalar;
use recast_reflect::Reflect;
use recast_reflect::info::{DescKind, NativeScalar, TypeDesc};
use recast_reflect::ops::ScalarRef;

use crate::MarshalError;

/// Converts a native scalar to a Record scalar.
///
/// ```
/// use recast_marshal::scalar::to_scalar;
/// use recast_record::Scalar;
/// use recast_reflect::ops::ScalarRef;
///
/// assert_eq!(to_scalar(ScalarRef::Char('Q')), Scalar::String(String::from("Q")));
/// assert_eq!(to_scalar(ScalarRef::I16(-3)), Scalar::Short(-3));
/// ```
pub fn to_scalar(value: ScalarRef<'_>) -> Scalar {
    match value {
        ScalarRef::I8(v) => Scalar::Byte(v),
        ScalarRef::I16(v) => Scalar::Short(v),
        ScalarRef::I32(v) => Scalar::Int(v),
        ScalarRef::I64(v) => Scalar::Long(v),
        ScalarRef::F32(v) => Scalar::Float(v),
        ScalarRef::F64(v) => Scalar::Double(v),
        ScalarRef::Bool(v) => Scalar::Boolean(v),
        ScalarRef::Char(v) => Scalar::String(v.to_string()),
        ScalarRef::Str(v) => Scalar::String(v.to_owned()),
    }
}

/// Converts a Record scalar to a value of the declared type `target`.
///
/// `Option<T>` targets produce a `T`. Generic targets (`dyn Reflect` and
/// [`Variant`](recast_reflect::ops::Variant)) produce the natural native type
/// of the scalar, e.g. `i32` for [`Scalar::Int`].
///
/// ```
/// use recast_marshal::{MarshalError, scalar::from_scalar};
/// use recast_record::Scalar;
/// use recast_reflect::info::Typed;
///
/// let value = from_scalar(&Scalar::Byte(7), <Option<i64> as Typed>::type_desc()).unwrap();
/// assert_eq!(value.downcast_ref::<i64>(), Some(&7));
///
/// let err = from_scalar(&Scalar::Int(1), <bool as Typed>::type_desc()).unwrap_err();
/// assert!(matches!(err, MarshalError::TypeMismatch(_)));
/// ```
pub fn from_scalar(scalar: &Scalar, target: &'static TypeDesc) -> Result<Box<dyn Reflect>, MarshalError> {
    let target = target.unwrap_optional();
    match target.kind() {
        DescKind::Scalar(native) => convert(scalar, *native),
        DescKind::Dynamic | DescKind::Variant => Ok(natural(scalar)),
        _ => Err(MarshalError::type_mismatch(format_args!(
            "{} scalar cannot be read as `{}`",
            scalar.kind(),
            target.type_name()
        ))),
    }
}

fn natural(scalar: &Scalar) -> Box<dyn Reflect> {
    match scalar {
        Scalar::Byte(v) => Box::new(*v),
        Scalar::Short(v) => Box::new(*v),
        Scalar::Int(v) => Box::new(*v),
        Scalar::Long(v) => Box::new(*v),
        Scalar::Float(v) => Box::new(*v),
        Scalar::Double(v) => Box::new(*v),
        Scalar::Boolean(v) => Box::new(*v),
        Scalar::String(v) => Box::new(v.clone()),
    }
}

fn convert(scalar: &Scalar, native: NativeScalar) -> Result<Box<dyn Reflect>, MarshalError> {
    if let Some(v) = scalar.as_i64() {
        return match native {
            NativeScalar::I8 => narrow::<i8>(v, native),
            NativeScalar::I16 => narrow::<i16>(v, native),
            NativeScalar::I32 => narrow::<i32>(v, native),
            NativeScalar::I64 => Ok(Box::new(v)),
            NativeScalar::F32 => exact(v, v as f32, native, |f| f as i128),
            NativeScalar::F64 => exact(v, v as f64, native, |f| f as i128),
            _ => Err(mismatch(scalar, native)),
        };
    }
    match (scalar, native) {
        (Scalar::Float(v), NativeScalar::F32) => Ok(Box::new(*v)),
        (Scalar::Float(v), NativeScalar::F64) => Ok(Box::new(f64::from(*v))),
        (Scalar::Double(v), NativeScalar::F32) => {
            if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                return Err(MarshalError::type_mismatch(format_args!("{v} is out of `f32` range")));
            }
            Ok(Box::new(*v as f32))
        }
        (Scalar::Double(v), NativeScalar::F64) => Ok(Box::new(*v)),
        (Scalar::Boolean(v), NativeScalar::Bool) => Ok(Box::new(*v)),
        (Scalar::String(v), NativeScalar::String) => Ok(Box::new(v.clone())),
        (Scalar::String(v), NativeScalar::Char) => to_char(v),
        _ => Err(mismatch(scalar, native)),
    }
}

fn narrow<T: TryFrom<i64> + Reflect>(v: i64, native: NativeScalar) -> Result<Box<dyn Reflect>, MarshalError> {
    match T::try_from(v) {
        Ok(v) => Ok(Box::new(v)),
        Err(_) => Err(MarshalError::type_mismatch(format_args!("{v} does not fit in `{native}`"))),
    }
}

/// Boxes `f`, the float converted from `v`, when it converts back to `v`.
fn exact<F: Reflect + Copy>(
    v: i64,
    f: F,
    native: NativeScalar,
    back: impl FnOnce(F) -> i128,
) -> Result<Box<dyn Reflect>, MarshalError> {
    if back(f) == i128::from(v) {
        Ok(Box::new(f))
    } else {
        Err(MarshalError::type_mismatch(format_args!("{v} has no exact `{native}` value")))
    }
}

fn to_char(v: &str) -> Result<Box<dyn Reflect>, MarshalError> {
    let mut chars = v.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Box::new(c)),
        (None, _) => Err(MarshalError::type_mismatch("an empty string cannot be read as `char`")),
        (Some(_), Some(_)) => Err(MarshalError::character_overflow(format_args!(
            "{v:?} has more than one character"
        ))),
    }
}

#[cold]
fn mismatch(scalar: &Scalar, native: NativeScalar) -> MarshalError {
    MarshalError::type_mismatch(format_args!("{} scalar cannot be read as `{native}`", scalar.kind()))
}

#[cfg(test)]
mod tests {
    use recast_record::Scalar;
    use recast_reflect::Reflect;
    use recast_reflect::info::Typed;
    use recast_reflect::ops::Variant;

    use super::from_scalar;
    use crate::MarshalError;

    fn read<T: Typed>(scalar: Scalar) -> Result<Box<dyn Reflect>, MarshalError> {
        from_scalar(&scalar, T::type_desc())
    }

    #[test]
    fn integers_widen_and_narrow_when_they_fit() {
        assert_eq!(read::<i64>(Scalar::Short(-2)).unwrap().downcast_ref::<i64>(), Some(&-2));
        assert_eq!(read::<i8>(Scalar::Long(100)).unwrap().downcast_ref::<i8>(), Some(&100));
        assert_eq!(read::<f64>(Scalar::Int(3)).unwrap().downcast_ref::<f64>(), Some(&3.0));
        assert!(matches!(read::<i8>(Scalar::Int(300)), Err(MarshalError::TypeMismatch(_))));
    }

    #[test]
    fn floats_take_only_what_they_can_hold() {
        let max_exact = 1_i64 << 24;
        assert_eq!(read::<f32>(Scalar::Int(16_777_216)).unwrap().downcast_ref::<f32>(), Some(&(max_exact as f32)));
        assert!(matches!(read::<f32>(Scalar::Int(16_777_217)), Err(MarshalError::TypeMismatch(_))));
        assert!(matches!(read::<f64>(Scalar::Long(i64::MAX)), Err(MarshalError::TypeMismatch(_))));
        assert_eq!(read::<f64>(Scalar::Long(-(1 << 53))).unwrap().downcast_ref::<f64>(), Some(&-9_007_199_254_740_992.0));

        assert_eq!(read::<f32>(Scalar::Double(0.1)).unwrap().downcast_ref::<f32>(), Some(&0.1_f32));
        assert!(matches!(read::<f32>(Scalar::Double(1e39)), Err(MarshalError::TypeMismatch(_))));
        assert!(read::<f32>(Scalar::Double(f64::INFINITY)).unwrap().downcast_ref::<f32>().is_some_and(|f| f.is_infinite()));
    }

    #[test]
    fn families_do_not_mix() {
        assert!(matches!(read::<i32>(Scalar::Double(1.0)), Err(MarshalError::TypeMismatch(_))));
        assert!(matches!(read::<bool>(Scalar::Byte(1)), Err(MarshalError::TypeMismatch(_))));
        assert!(matches!(read::<String>(Scalar::Boolean(true)), Err(MarshalError::TypeMismatch(_))));
        assert!(matches!(read::<Vec<i32>>(Scalar::Int(1)), Err(MarshalError::TypeMismatch(_))));
    }

    #[test]
    fn characters_need_exactly_one() {
        let c = read::<char>(Scalar::String(String::from("Q"))).unwrap();
        assert_eq!(c.downcast_ref::<char>(), Some(&'Q'));

        assert!(matches!(
            read::<char>(Scalar::String(String::from("QR"))),
            Err(MarshalError::CharacterOverflow(_))
        ));
        assert!(matches!(
            read::<Option<char>>(Scalar::String(String::new())),
            Err(MarshalError::TypeMismatch(_))
        ));
    }

    #[test]
    fn generic_targets_get_the_natural_type() {
        let value = read::<Variant>(Scalar::Float(0.5)).unwrap();
        assert_eq!(value.downcast_ref::<f32>(), Some(&0.5));

        let value = from_scalar(&Scalar::String(String::from("x")), <dyn Reflect as Typed>::type_desc()).unwrap();
        assert!(value.is::<String>());
    }
}
