//! Conversion of structs to and from Records, and the per-field dispatch
//! shared by all codecs.
//!
//! Serializing runs two passes over the same fields in the same order: one
//! declares the shape, the other writes the values. Fields holding an absent
//! value are left out of both.

use recast_record::{FieldKind, FieldType, Record, RecordError, Shape, UnionType};
use recast_reflect::Reflect;
use recast_reflect::info::{DescKind, RecordDesc, TypeDesc, Typed};
use recast_reflect::ops::{DynamicMap, Object};

use crate::classify::FieldClass;
use crate::{MarshalError, Marshaller, accessor, array, field_path, map, scalar, union};

// -----------------------------------------------------------------------------
// Field dispatch

/// The declared field type of `value`, classified as `class`.
pub fn field_type(value: &dyn Reflect, class: FieldClass, marshaller: &Marshaller<'_>) -> Result<FieldType, MarshalError> {
    match class {
        FieldClass::Scalar(kind) => Ok(FieldType::Scalar(kind)),
        FieldClass::Record | FieldClass::Map => Ok(FieldType::Record(marshaller.build_shape(value)?)),
        FieldClass::VariantUnion => Ok(FieldType::Union(UnionType::Variant)),
        FieldClass::ScalarArray(_) | FieldClass::RecordArray | FieldClass::UnionArray => {
            array::field_type(value, class, marshaller)
        }
    }
}

/// Writes `value`, classified as `class`, into the field `name`.
pub fn populate_field(
    value: &dyn Reflect,
    class: FieldClass,
    record: &mut Record,
    name: &str,
    marshaller: &Marshaller<'_>,
) -> Result<(), MarshalError> {
    log::trace!("writing field `{name}` as {class:?}");
    match class {
        FieldClass::Scalar(_) => match value.as_scalar() {
            Some(native) => record.put_scalar(name, scalar::to_scalar(native))?,
            None => {
                return Err(MarshalError::type_mismatch(format_args!(
                    "`{}` is not a scalar",
                    value.reflect_type_desc().type_name()
                )));
            }
        },
        FieldClass::Record | FieldClass::Map => marshaller.populate(value, record.child_mut(name)?)?,
        FieldClass::VariantUnion => union::populate(value, record, name, marshaller)?,
        FieldClass::ScalarArray(_) | FieldClass::RecordArray | FieldClass::UnionArray => {
            array::populate(value, record, name, class, marshaller)?;
        }
    }
    Ok(())
}

/// Reads the field `name` of `record` as the declared type `target`.
///
/// Returns `Ok(None)` when there is nothing to assign, i.e. for an empty
/// union read into a non-[`Variant`](recast_reflect::ops::Variant) target.
pub fn read_field(
    record: &Record,
    name: &str,
    target: &'static TypeDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Option<Box<dyn Reflect>>, MarshalError> {
    let kind = match record.shape().field(name) {
        Some(def) => def.kind(),
        None => return Err(RecordError::NoSuchField(name.to_owned()).into()),
    };
    log::trace!("reading {kind} field `{name}` as `{}`", target.type_name());
    match kind {
        FieldKind::Scalar => scalar::from_scalar(record.get_scalar(name)?, target).map(Some),
        FieldKind::Record => read_object(record.child(name)?, Some(target), marshaller).map(Some),
        FieldKind::Union => union::read_union(record.union(name)?, target, marshaller),
        FieldKind::ScalarArray | FieldKind::RecordArray | FieldKind::UnionArray => {
            array::read_into(record, name, target, marshaller).map(Some)
        }
    }
}

// -----------------------------------------------------------------------------
// Serialization

/// Declares one field per present field of `object`, in declaration order.
///
/// The shape carries the type identifier registered for the object's type.
pub fn build_shape(object: &dyn Object, marshaller: &Marshaller<'_>) -> Result<Shape, MarshalError> {
    let mut builder = Shape::builder();
    if let Some(id) = marshaller.registry().type_id_of(object.ty_id()) {
        builder.set_id(id);
    }
    for (name, value) in object.iter_fields() {
        let _guard = field_path::enter(name);
        let Some(class) = marshaller.classify(value)? else {
            log::trace!("leaving out absent field `{name}`");
            continue;
        };
        builder.add(name, field_type(value, class, marshaller)?)?;
    }
    Ok(builder.build())
}

/// Writes the fields of `object` into a Record of the shape returned by
/// [`build_shape`].
///
/// The shape may declare fields `object` leaves absent, but every present
/// field must be declared.
pub fn populate(object: &dyn Object, record: &mut Record, marshaller: &Marshaller<'_>) -> Result<(), MarshalError> {
    let shape = record.shape().clone();
    for def in shape.fields() {
        let name = def.name();
        let _guard = field_path::enter(name);
        let Some(value) = accessor::resolve_getter(object, name, marshaller.registry())? else {
            continue;
        };
        let Some(class) = marshaller.classify(value)? else {
            continue;
        };
        populate_field(value, class, record, name, marshaller)?;
    }
    for (name, value) in object.iter_fields() {
        if shape.field(name).is_none() && marshaller.classify(value)?.is_some() {
            let _guard = field_path::enter(name);
            return Err(undeclared(name));
        }
    }
    Ok(())
}

#[cold]
pub(crate) fn undeclared(name: &str) -> MarshalError {
    MarshalError::type_mismatch(format_args!("field `{name}` holds a value the record shape does not declare"))
}

// -----------------------------------------------------------------------------
// Deserialization

/// Reconstructs a value from `record`.
///
/// The type to build is, in order of precedence:
///
/// 1. whatever the custom deserializer registered for the record's type
///    identifier returns; it replaces the whole traversal.
/// 2. `target`, unless it is generic (`dyn Reflect` or `Variant`).
/// 3. the type registered for the record's type identifier.
/// 4. a [`DynamicMap`].
///
/// A struct without constructor cannot be built and fails with
/// [`MarshalError::UnsupportedType`].
pub fn read_object(
    record: &Record,
    target: Option<&'static TypeDesc>,
    marshaller: &Marshaller<'_>,
) -> Result<Box<dyn Reflect>, MarshalError> {
    let registry = marshaller.registry();
    if let Some(id) = record.id()
        && let Some(custom) = registry.deserializer(id)
    {
        log::debug!("custom deserializer takes over record `{id}`");
        return custom.deserialize(record, marshaller);
    }

    let desc = target
        .map(TypeDesc::unwrap_optional)
        .filter(|desc| !matches!(desc.kind(), DescKind::Dynamic | DescKind::Variant))
        .or_else(|| record.id().and_then(|id| registry.registered_type(id)))
        .unwrap_or_else(<DynamicMap as Typed>::type_desc);

    match desc.kind() {
        DescKind::Record(fields) => read_struct(record, desc, fields, marshaller),
        DescKind::Map(_) => map::read_map(record, desc, marshaller),
        kind => Err(MarshalError::type_mismatch(format_args!(
            "a record cannot be read as {} `{}`",
            kind.name(),
            desc.type_name()
        ))),
    }
}

fn read_struct(
    record: &Record,
    desc: &'static TypeDesc,
    fields: &RecordDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Box<dyn Reflect>, MarshalError> {
    let Some(mut object) = fields.construct() else {
        return Err(MarshalError::unsupported(format_args!(
            "cannot instantiate abstract target `{}`",
            desc.type_name()
        )));
    };
    for def in record.fields() {
        let name = def.name();
        let _guard = field_path::enter(name);
        let Some(field) = accessor::resolve_setter(desc, name, marshaller.registry())? else {
            continue;
        };
        let Some(value) = read_field(record, name, field.desc(), marshaller)? else {
            continue;
        };
        object.set_field(field.name(), value).map_err(|value| {
            MarshalError::type_mismatch(format_args!(
                "`{}` cannot be assigned to field `{name}` of `{}`",
                value.reflect_type_desc().type_name(),
                desc.type_name()
            ))
        })?;
    }
    let object: Box<dyn Reflect> = object;
    Ok(object)
}

#[cfg(test)]
mod tests {
    use recast_record::{Record, Scalar, ScalarKind, Shape};
    use recast_reflect::derive::Reflect;
    use recast_reflect::info::Typed;
    use recast_reflect::ops::DynamicMap;

    use super::{build_shape, read_object};
    use crate::{MarshalError, Marshaller, Registry};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Profile {
        name: String,
        age: Option<i32>,
    }

    #[derive(Reflect)]
    struct Sealed {
        code: i64,
    }

    #[test]
    fn absent_fields_are_left_out() {
        let registry = Registry::builder().register_type_id::<Profile>("profile").build();
        let marshaller = Marshaller::new(&registry);

        let profile = Profile {
            name: String::from("ada"),
            age: None,
        };
        let shape = build_shape(&profile, &marshaller).unwrap();
        assert_eq!(shape.id(), Some("profile"));
        assert_eq!(shape.len(), 1);
        assert!(shape.field("age").is_none());
    }

    #[test]
    fn target_resolution_order() {
        let mut builder = Shape::builder();
        builder.set_id("profile");
        builder.add_scalar("name", ScalarKind::String).unwrap();
        let mut record = Record::new(&builder.build());
        record.put_scalar("name", Scalar::String(String::from("ada"))).unwrap();

        let plain = Registry::new();
        let value = read_object(&record, None, &Marshaller::new(&plain)).unwrap();
        let map = value.downcast_ref::<DynamicMap>().unwrap();
        assert_eq!(map.get_as::<String>("name").map(String::as_str), Some("ada"));

        let registered = Registry::builder().register_type::<Profile>("profile").build();
        let value = read_object(&record, None, &Marshaller::new(&registered)).unwrap();
        assert_eq!(
            value.downcast_ref::<Profile>(),
            Some(&Profile {
                name: String::from("ada"),
                age: None,
            })
        );

        let value = read_object(&record, Some(DynamicMap::type_desc()), &Marshaller::new(&registered)).unwrap();
        assert!(value.is::<DynamicMap>());
    }

    #[test]
    fn targets_without_constructor_are_refused() {
        let mut builder = Shape::builder();
        builder.add_scalar("code", ScalarKind::Long).unwrap();
        let record = Record::new(&builder.build());

        let registry = Registry::new();
        let err = read_object(&record, Some(Sealed::type_desc()), &Marshaller::new(&registry)).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));

        let sealed = Sealed { code: 1 };
        assert_eq!(sealed.code, 1);
    }
}
