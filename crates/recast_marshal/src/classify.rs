//! Classification of native types and values into Record field kinds.

use recast_record::ScalarKind;
use recast_reflect::Reflect;
use recast_reflect::info::{DescKind, NativeScalar, TypeDesc};
use recast_reflect::ops::ReflectRef;

use crate::MarshalError;

// -----------------------------------------------------------------------------
// FieldClass

/// The Record field kind a native type or value maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Scalar(ScalarKind),
    ScalarArray(ScalarKind),
    /// A struct, stored as a nested Record.
    Record,
    RecordArray,
    /// A [`Variant`](recast_reflect::ops::Variant), stored as a variant union.
    VariantUnion,
    UnionArray,
    /// A string-keyed map, stored as a nested Record.
    Map,
}

impl FieldClass {
    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ScalarArray(_) | Self::RecordArray | Self::UnionArray)
    }
}

/// The Record scalar kind of a native scalar. `char` is stored as a string.
pub const fn scalar_kind(native: NativeScalar) -> ScalarKind {
    match native {
        NativeScalar::I8 => ScalarKind::Byte,
        NativeScalar::I16 => ScalarKind::Short,
        NativeScalar::I32 => ScalarKind::Int,
        NativeScalar::I64 => ScalarKind::Long,
        NativeScalar::F32 => ScalarKind::Float,
        NativeScalar::F64 => ScalarKind::Double,
        NativeScalar::Bool => ScalarKind::Boolean,
        NativeScalar::Char | NativeScalar::String => ScalarKind::String,
    }
}

// -----------------------------------------------------------------------------
// Static classification

/// Classifies a declared type.
///
/// `Option<T>` classifies as `T`. Sequences of [`Dynamic`](DescKind::Dynamic)
/// elements are record arrays: without a value to inspect, a generic element
/// is taken for a nested Record.
///
/// # Examples
///
/// ```
/// use recast_marshal::FieldClass;
/// use recast_marshal::classify::classify_desc;
/// use recast_record::ScalarKind;
/// use recast_reflect::info::Typed;
/// use recast_reflect::ops::Variant;
///
/// let class = classify_desc(<Option<Vec<char>> as Typed>::type_desc()).unwrap();
/// assert_eq!(class, FieldClass::ScalarArray(ScalarKind::String));
///
/// let class = classify_desc(<[Variant; 2] as Typed>::type_desc()).unwrap();
/// assert_eq!(class, FieldClass::UnionArray);
///
/// assert!(classify_desc(<Vec<Vec<i32>> as Typed>::type_desc()).is_err());
/// ```
pub fn classify_desc(desc: &'static TypeDesc) -> Result<FieldClass, MarshalError> {
    let desc = desc.unwrap_optional();
    match desc.kind() {
        DescKind::Scalar(native) => Ok(FieldClass::Scalar(scalar_kind(*native))),
        DescKind::Array(array) => classify_element(desc, array.elem()),
        DescKind::List(list) => classify_element(desc, list.elem()),
        DescKind::Map(map) => {
            check_key(desc, map.key())?;
            Ok(FieldClass::Map)
        }
        DescKind::Record(_) => Ok(FieldClass::Record),
        DescKind::Variant => Ok(FieldClass::VariantUnion),
        DescKind::TaggedUnion(_) => Err(regular_union(desc)),
        DescKind::Optional(_) | DescKind::Dynamic => Err(MarshalError::unsupported(format_args!(
            "`{}` has no static field kind",
            desc.type_name()
        ))),
    }
}

/// The element type of an array or list, or the value type of a map.
pub fn element_desc(desc: &'static TypeDesc) -> Option<&'static TypeDesc> {
    match desc.unwrap_optional().kind() {
        DescKind::Array(array) => Some(array.elem()),
        DescKind::List(list) => Some(list.elem()),
        DescKind::Map(map) => Some(map.value()),
        _ => None,
    }
}

fn classify_element(container: &TypeDesc, elem: &'static TypeDesc) -> Result<FieldClass, MarshalError> {
    let elem = elem.unwrap_optional();
    match elem.kind() {
        DescKind::Scalar(native) => Ok(FieldClass::ScalarArray(scalar_kind(*native))),
        DescKind::Record(_) | DescKind::Dynamic => Ok(FieldClass::RecordArray),
        DescKind::Variant => Ok(FieldClass::UnionArray),
        DescKind::TaggedUnion(_) => Err(regular_union(elem)),
        kind => Err(MarshalError::unsupported(format_args!(
            "`{}` is an array of {}s",
            container.type_name(),
            kind.name()
        ))),
    }
}

fn check_key(map: &TypeDesc, key: &'static TypeDesc) -> Result<(), MarshalError> {
    if key.as_scalar() == Some(NativeScalar::String) {
        Ok(())
    } else {
        Err(MarshalError::key_type(format_args!(
            "`{}` is keyed by `{}`",
            map.type_name(),
            key.type_name()
        )))
    }
}

#[cold]
fn regular_union(desc: &TypeDesc) -> MarshalError {
    MarshalError::union_kind(format_args!("`{}` is a regular union", desc.type_name()))
}

// -----------------------------------------------------------------------------
// Runtime classification

/// Classifies a value, `None` when the value is absent.
///
/// Unlike [`classify_desc`], sequences of generic elements are classified
/// after their first element: a [`DynamicList`] of integers is a scalar array
/// and a `DynamicList` of maps a record array. An empty generic sequence is
/// an empty record array.
///
/// [`DynamicList`]: recast_reflect::ops::DynamicList
pub fn classify_value(value: &dyn Reflect) -> Result<Option<FieldClass>, MarshalError> {
    match value.reflect_ref() {
        ReflectRef::Absent => Ok(None),
        ReflectRef::Scalar(scalar) => Ok(Some(FieldClass::Scalar(scalar_kind(scalar.native())))),
        ReflectRef::Array(array) => classify_sequence(value.reflect_type_desc(), array.iter().next()).map(Some),
        ReflectRef::List(list) => classify_sequence(value.reflect_type_desc(), list.iter().next()).map(Some),
        ReflectRef::Map(_) => {
            let desc = value.reflect_type_desc().unwrap_optional();
            match desc.as_map() {
                Some(map) => check_key(desc, map.key())?,
                None => return Err(MarshalError::unsupported(format_args!(
                    "`{}` has no map descriptor",
                    desc.type_name()
                ))),
            }
            Ok(Some(FieldClass::Map))
        }
        ReflectRef::Object(_) => Ok(Some(FieldClass::Record)),
        ReflectRef::Variant(_) => Ok(Some(FieldClass::VariantUnion)),
        ReflectRef::TaggedUnion(_) => Err(regular_union(value.reflect_type_desc())),
    }
}

fn classify_sequence(desc: &'static TypeDesc, first: Option<&dyn Reflect>) -> Result<FieldClass, MarshalError> {
    let container = desc.unwrap_optional();
    let Some(elem) = element_desc(container) else {
        return Err(MarshalError::unsupported(format_args!(
            "`{}` has no element descriptor",
            container.type_name()
        )));
    };
    if !elem.unwrap_optional().is_dynamic() {
        return classify_element(container, elem);
    }
    let Some(first) = first else {
        return Ok(FieldClass::RecordArray);
    };
    match classify_value(first)? {
        Some(FieldClass::Scalar(kind)) => Ok(FieldClass::ScalarArray(kind)),
        Some(FieldClass::Record | FieldClass::Map) => Ok(FieldClass::RecordArray),
        Some(FieldClass::VariantUnion) => Ok(FieldClass::UnionArray),
        Some(class) => Err(MarshalError::unsupported(format_args!(
            "`{}` holds nested arrays ({class:?})",
            container.type_name()
        ))),
        None => Err(MarshalError::unsupported(format_args!(
            "`{}` starts with an absent element",
            container.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use recast_record::ScalarKind;
    use recast_reflect::Reflect;
    use recast_reflect::info::Typed;
    use recast_reflect::ops::{DynamicList, DynamicMap, Variant};

    use super::{FieldClass, classify_desc, classify_value};
    use crate::MarshalError;

    #[test]
    fn declared_types() {
        let class = |desc| classify_desc(desc).unwrap();

        assert_eq!(class(<i16 as Typed>::type_desc()), FieldClass::Scalar(ScalarKind::Short));
        assert_eq!(class(<char as Typed>::type_desc()), FieldClass::Scalar(ScalarKind::String));
        assert_eq!(class(<Option<f32> as Typed>::type_desc()), FieldClass::Scalar(ScalarKind::Float));
        assert_eq!(class(<[bool; 3] as Typed>::type_desc()), FieldClass::ScalarArray(ScalarKind::Boolean));
        assert_eq!(class(<DynamicList as Typed>::type_desc()), FieldClass::RecordArray);
        assert_eq!(class(<Variant as Typed>::type_desc()), FieldClass::VariantUnion);
        assert_eq!(class(<BTreeMap<String, i8> as Typed>::type_desc()), FieldClass::Map);
    }

    #[test]
    fn rejected_declared_types() {
        assert!(matches!(
            classify_desc(<BTreeMap<i32, i8> as Typed>::type_desc()),
            Err(MarshalError::KeyTypeError(_))
        ));
        assert!(matches!(
            classify_desc(<Vec<DynamicMap> as Typed>::type_desc()),
            Err(MarshalError::UnsupportedType(_))
        ));
        assert!(matches!(
            classify_desc(<dyn Reflect as Typed>::type_desc()),
            Err(MarshalError::UnsupportedType(_))
        ));
    }

    #[test]
    fn generic_sequences_follow_their_first_element() {
        let empty = DynamicList::new();
        assert_eq!(classify_value(&empty).unwrap(), Some(FieldClass::RecordArray));

        let ints: DynamicList = [1_i64, 2].into_iter().collect();
        assert_eq!(classify_value(&ints).unwrap(), Some(FieldClass::ScalarArray(ScalarKind::Long)));

        let maps: DynamicList = [DynamicMap::new()].into_iter().collect();
        assert_eq!(classify_value(&maps).unwrap(), Some(FieldClass::RecordArray));

        let nested: DynamicList = [DynamicList::new()].into_iter().collect();
        assert!(matches!(classify_value(&nested), Err(MarshalError::UnsupportedType(_))));
    }

    #[test]
    fn absent_values_have_no_class() {
        assert_eq!(classify_value(&None::<i32>).unwrap(), None);
        assert_eq!(
            classify_value(&Some(4_i32)).unwrap(),
            Some(FieldClass::Scalar(ScalarKind::Int))
        );
    }
}
