//! Conversion of [`Variant`] values to and from variant unions.
//!
//! Regular unions, whose members are declared up front, have no native
//! counterpart and are refused in both directions.

use recast_record::{Record, Union, UnionValue};
use recast_reflect::Reflect;
use recast_reflect::info::{DescKind, TypeDesc, Typed};
use recast_reflect::ops::{ReflectRef, Variant};

use crate::classify::FieldClass;
use crate::{MarshalError, Marshaller, record, scalar};

/// Converts a [`Variant`] to a variant union.
///
/// The held value is classified at runtime: scalars stay scalars, structs and
/// maps become nested Records. An empty `Variant` gives an empty union.
pub fn to_union(value: &dyn Reflect, marshaller: &Marshaller<'_>) -> Result<Union, MarshalError> {
    let variant = match value.reflect_ref() {
        ReflectRef::Variant(variant) => variant,
        ReflectRef::TaggedUnion(_) => {
            return Err(MarshalError::union_kind(format_args!(
                "`{}` is a regular union",
                value.reflect_type_desc().type_name()
            )));
        }
        other => {
            return Err(MarshalError::type_mismatch(format_args!(
                "{} value `{}` is not a variant",
                other.kind_name(),
                value.reflect_type_desc().type_name()
            )));
        }
    };

    let mut union = Union::variant();
    let Some(held) = variant.get() else {
        return Ok(union);
    };
    let held_value = match marshaller.classify(held)? {
        None => return Ok(union),
        Some(FieldClass::Scalar(_)) => match held.as_scalar() {
            Some(native) => UnionValue::Scalar(scalar::to_scalar(native)),
            None => return Err(MarshalError::unsupported("scalar without scalar view")),
        },
        Some(FieldClass::Record | FieldClass::Map) => UnionValue::Record(marshaller.serialize(held)?),
        Some(class) => {
            return Err(MarshalError::unsupported(format_args!(
                "a variant union cannot hold a {class:?} (`{}`)",
                held.reflect_type_desc().type_name()
            )));
        }
    };
    union.set(held_value)?;
    Ok(union)
}

/// Writes the [`Variant`] `value` into the union field `name`.
pub fn populate(
    value: &dyn Reflect,
    record: &mut Record,
    name: &str,
    marshaller: &Marshaller<'_>,
) -> Result<(), MarshalError> {
    if !record.union(name)?.is_variant() {
        return Err(regular_union(name));
    }
    let union = to_union(value, marshaller)?;
    *record.union_mut(name)? = union;
    Ok(())
}

/// Reads a variant union as the declared type `target`.
///
/// A [`Variant`] target receives whatever the union holds, in its natural
/// type. Any other target must accept the held value. Returns `Ok(None)` for
/// an empty union and a non-`Variant` target.
pub fn read_union(
    union: &Union,
    target: &'static TypeDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Option<Box<dyn Reflect>>, MarshalError> {
    if !union.is_variant() {
        return Err(MarshalError::union_kind("a regular union cannot be read"));
    }
    let target = target.unwrap_optional();
    let wrap = matches!(target.kind(), DescKind::Variant);
    let inner = if wrap || target.is_dynamic() {
        <dyn Reflect as Typed>::type_desc()
    } else {
        target
    };

    let value = match union.get() {
        None => None,
        Some(UnionValue::Scalar(value)) => Some(scalar::from_scalar(value, inner)?),
        Some(UnionValue::Record(child)) => Some(record::read_object(child, Some(inner), marshaller)?),
        Some(held @ (UnionValue::ScalarArray(_) | UnionValue::RecordArray(_))) => {
            return Err(MarshalError::unsupported(format_args!(
                "a variant union holding a {} cannot be read",
                held.kind()
            )));
        }
    };

    if wrap {
        let variant = value.map_or_else(Variant::empty, Variant::from_boxed);
        Ok(Some(variant.into_boxed_reflect()))
    } else {
        Ok(value)
    }
}

#[cold]
fn regular_union(name: &str) -> MarshalError {
    MarshalError::union_kind(format_args!("field `{name}` is a regular union"))
}

#[cfg(test)]
mod tests {
    use recast_record::{FieldDef, FieldType, Scalar, ScalarArray, ScalarKind, Union, UnionType, UnionValue};
    use recast_reflect::info::Typed;
    use recast_reflect::ops::{DynamicList, Variant};

    use super::{read_union, to_union};
    use crate::{MarshalError, Marshaller, Registry};

    #[test]
    fn scalars_keep_their_kind() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);

        let union = to_union(&Variant::new('x'), &marshaller).unwrap();
        assert_eq!(union.get(), Some(&UnionValue::Scalar(Scalar::String(String::from("x")))));

        let value = read_union(&union, <Variant as Typed>::type_desc(), &marshaller)
            .unwrap()
            .unwrap();
        let variant = value.downcast_ref::<Variant>().unwrap();
        assert_eq!(variant.downcast_ref::<String>().map(String::as_str), Some("x"));

        let value = read_union(&union, <char as Typed>::type_desc(), &marshaller).unwrap();
        assert_eq!(value.unwrap().downcast_ref::<char>(), Some(&'x'));
    }

    #[test]
    fn empty_variants_round_trip() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);

        let union = to_union(&Variant::empty(), &marshaller).unwrap();
        assert!(union.get().is_none());

        let value = read_union(&union, <Variant as Typed>::type_desc(), &marshaller).unwrap();
        assert!(value.unwrap().downcast_ref::<Variant>().unwrap().is_empty());
        assert!(read_union(&union, <i32 as Typed>::type_desc(), &marshaller).unwrap().is_none());
    }

    #[test]
    fn arrays_and_regular_unions_are_refused() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);

        let list: DynamicList = [1_i32].into_iter().collect();
        let err = to_union(&Variant::new(list), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));

        let mut union = Union::variant();
        union.set(UnionValue::ScalarArray(ScalarArray::empty(ScalarKind::Int))).unwrap();
        let err = read_union(&union, <Variant as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));

        let regular = Union::new(UnionType::Regular(vec![FieldDef::new(
            "count",
            FieldType::Scalar(ScalarKind::Int),
        )]));
        let err = read_union(&regular, <Variant as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::UnionKindError(_)));
    }
}
