//! Conversion of fixed arrays and sequences to and from Record array fields.
//!
//! Records move array elements in windows of at most
//! [`CHUNK_LEN`](recast_record::CHUNK_LEN), so every transfer here loops
//! until the whole array is written or read.

use recast_record::{
    FieldDef, FieldKind, FieldType, Record, RecordError, Scalar, ScalarArray, Shape, Union, UnionType,
};
use recast_reflect::Reflect;
use recast_reflect::info::{DescKind, TypeDesc, Typed};
use recast_reflect::ops::{DynamicList, ReflectRef};

use crate::classify::FieldClass;
use crate::{MarshalError, Marshaller, field_path, record, scalar, union};

// -----------------------------------------------------------------------------
// Serialization

/// The declared field type of the array `value` classified as `class`.
///
/// The element shape of a record array declares every field present in any
/// element, so all elements share it. An empty array gets an empty shape.
pub fn field_type(value: &dyn Reflect, class: FieldClass, marshaller: &Marshaller<'_>) -> Result<FieldType, MarshalError> {
    match class {
        FieldClass::ScalarArray(kind) => Ok(FieldType::ScalarArray(kind)),
        FieldClass::RecordArray => {
            let mut declared: Option<Shape> = None;
            for (index, item) in items(value)?.into_iter().enumerate() {
                let _guard = field_path::enter_index(index);
                let shape = marshaller.build_shape(item)?;
                declared = Some(match declared {
                    Some(declared) => merge_shapes(&declared, &shape)?,
                    None => shape,
                });
            }
            Ok(FieldType::RecordArray(declared.unwrap_or_else(|| Shape::builder().build())))
        }
        FieldClass::UnionArray => Ok(FieldType::UnionArray(UnionType::Variant)),
        class => Err(MarshalError::unsupported(format_args!("{class:?} is not an array class"))),
    }
}

/// Combines two element shapes into one declaring the fields of both.
///
/// Fields of `b` missing from `a` are placed after the last field the two
/// have in common. A field declared with different types fails.
fn merge_shapes(a: &Shape, b: &Shape) -> Result<Shape, MarshalError> {
    if a == b {
        return Ok(a.clone());
    }
    let id = match (a.id(), b.id()) {
        (Some(x), Some(y)) if x != y => {
            return Err(MarshalError::type_mismatch(format_args!(
                "array elements of types `{x}` and `{y}` cannot share a shape"
            )));
        }
        (x, y) => x.or(y),
    };

    let mut fields: Vec<FieldDef> = a.fields().to_vec();
    let mut cursor = 0;
    for def in b.fields() {
        match fields.iter().position(|f| f.name() == def.name()) {
            Some(at) => {
                let ty = merge_types(def.name(), fields[at].ty(), def.ty())?;
                fields[at] = FieldDef::new(def.name(), ty);
                cursor = at + 1;
            }
            None => {
                fields.insert(cursor, def.clone());
                cursor += 1;
            }
        }
    }

    let mut builder = Shape::builder();
    if let Some(id) = id {
        builder.set_id(id);
    }
    for def in fields {
        builder.add(def.name(), def.ty().clone())?;
    }
    Ok(builder.build())
}

fn merge_types(name: &str, a: &FieldType, b: &FieldType) -> Result<FieldType, MarshalError> {
    match (a, b) {
        _ if a == b => Ok(a.clone()),
        (FieldType::Record(x), FieldType::Record(y)) => Ok(FieldType::Record(merge_shapes(x, y)?)),
        (FieldType::RecordArray(x), FieldType::RecordArray(y)) => Ok(FieldType::RecordArray(merge_shapes(x, y)?)),
        _ => Err(MarshalError::type_mismatch(format_args!(
            "array elements declare field `{name}` as {} and as {}",
            a.kind(),
            b.kind()
        ))),
    }
}

/// Writes the elements of the array `value` into the array field `name`.
pub fn populate(
    value: &dyn Reflect,
    record: &mut Record,
    name: &str,
    class: FieldClass,
    marshaller: &Marshaller<'_>,
) -> Result<(), MarshalError> {
    let items = items(value)?;
    match class {
        FieldClass::ScalarArray(kind) => {
            let mut array = ScalarArray::empty(kind);
            for (index, item) in items.iter().enumerate() {
                let _guard = field_path::enter_index(index);
                let Some(native) = item.as_scalar() else {
                    return Err(MarshalError::unsupported(format_args!(
                        "{} element in a {kind} array",
                        item.reflect_ref().kind_name()
                    )));
                };
                array.push(scalar::to_scalar(native)).map_err(|scalar| {
                    MarshalError::type_mismatch(format_args!("{} element in a {kind} array", scalar.kind()))
                })?;
            }
            write_all(name, array.len(), |offset| {
                record.put_array(name, offset, array.slice(offset, array.len()))
            })
        }
        FieldClass::RecordArray => {
            let declared = match record.shape().field(name).map(FieldDef::ty) {
                Some(FieldType::RecordArray(shape)) => shape.clone(),
                _ => {
                    return Err(MarshalError::type_mismatch(format_args!(
                        "field `{name}` is not declared as a record array"
                    )));
                }
            };
            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let _guard = field_path::enter_index(index);
                let mut element = Record::new(&declared);
                marshaller.populate(*item, &mut element)?;
                records.push(element);
            }
            write_all(name, records.len(), |offset| {
                record.put_records(name, offset, &records[offset..])
            })
        }
        FieldClass::UnionArray => {
            let mut unions = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let _guard = field_path::enter_index(index);
                unions.push(union::to_union(*item, marshaller)?);
            }
            write_all(name, unions.len(), |offset| {
                record.put_unions(name, offset, &unions[offset..])
            })
        }
        class => Err(MarshalError::unsupported(format_args!("{class:?} is not an array class"))),
    }
}

fn items(value: &dyn Reflect) -> Result<Vec<&dyn Reflect>, MarshalError> {
    match value.reflect_ref() {
        ReflectRef::Array(array) => Ok(array.iter().collect()),
        ReflectRef::List(list) => Ok(list.iter().collect()),
        other => Err(MarshalError::type_mismatch(format_args!(
            "{} value `{}` is not an array",
            other.kind_name(),
            value.reflect_type_desc().type_name()
        ))),
    }
}

/// Calls `put` with increasing offsets until `len` elements are accepted.
fn write_all(
    name: &str,
    len: usize,
    mut put: impl FnMut(usize) -> Result<usize, RecordError>,
) -> Result<(), MarshalError> {
    let mut offset = 0;
    while offset < len {
        let written = put(offset)?;
        if written == 0 {
            return Err(MarshalError::custom(format_args!(
                "field `{name}` accepted no elements at offset {offset}"
            )));
        }
        offset += written;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Deserialization

/// Reads the whole scalar array field `name`.
pub fn read_scalars(record: &Record, name: &str) -> Result<Vec<Scalar>, MarshalError> {
    let len = record.array_len(name)?;
    let mut scalars = Vec::with_capacity(len);
    while scalars.len() < len {
        let chunk = record.get_array(name, scalars.len(), len - scalars.len())?;
        if chunk.offset() != scalars.len() {
            return Err(MarshalError::custom(format_args!(
                "field `{name}` returned a chunk at offset {} while reading offset {}",
                chunk.offset(),
                scalars.len()
            )));
        }
        check_progress(name, chunk.len(), scalars.len(), len)?;
        scalars.extend(chunk.data().iter());
    }
    Ok(scalars)
}

/// Reads the whole record array field `name`.
pub fn read_records<'a>(record: &'a Record, name: &str) -> Result<Vec<&'a Record>, MarshalError> {
    let len = record.array_len(name)?;
    let mut records = Vec::with_capacity(len);
    while records.len() < len {
        let chunk = record.get_records(name, records.len(), len - records.len())?;
        check_progress(name, chunk.len(), records.len(), len)?;
        records.extend(chunk);
    }
    Ok(records)
}

/// Reads the whole union array field `name`.
pub fn read_unions<'a>(record: &'a Record, name: &str) -> Result<Vec<&'a Union>, MarshalError> {
    let len = record.array_len(name)?;
    let mut unions = Vec::with_capacity(len);
    while unions.len() < len {
        let chunk = record.get_unions(name, unions.len(), len - unions.len())?;
        check_progress(name, chunk.len(), unions.len(), len)?;
        unions.extend(chunk);
    }
    Ok(unions)
}

/// Fails on a chunk that is empty, or longer than what is left, before
/// `len` elements are read.
fn check_progress(name: &str, chunk: usize, offset: usize, len: usize) -> Result<(), MarshalError> {
    if chunk == 0 || chunk > len - offset {
        return Err(MarshalError::custom(format_args!(
            "field `{name}` returned {chunk} elements at offset {offset} of {len}"
        )));
    }
    Ok(())
}

/// Reads the array field `name` into a value of the declared type `target`.
///
/// - `[T; N]` needs exactly `N` elements, `Box<[T]>` takes any number.
/// - Lists are created empty and filled in order.
/// - Generic targets produce a [`DynamicList`], unless
///   [`Registry::generic_sequences`](crate::Registry::generic_sequences) is
///   off.
pub fn read_into(
    record: &Record,
    name: &str,
    target: &'static TypeDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Box<dyn Reflect>, MarshalError> {
    let target = target.unwrap_optional();
    let elem = match target.kind() {
        DescKind::Array(array) => array.elem(),
        DescKind::List(list) => list.elem(),
        DescKind::Dynamic | DescKind::Variant => {
            if !marshaller.registry().generic_sequences() {
                return Err(MarshalError::unsupported(format_args!(
                    "array field `{name}` has no concrete target type"
                )));
            }
            <dyn Reflect as Typed>::type_desc()
        }
        _ => {
            return Err(MarshalError::type_mismatch(format_args!(
                "array field `{name}` cannot be read as `{}`",
                target.type_name()
            )));
        }
    };
    if let DescKind::Array(_) | DescKind::List(_) | DescKind::Map(_) = elem.unwrap_optional().kind() {
        return Err(MarshalError::unsupported(format_args!(
            "`{}` is an array of {}s",
            target.type_name(),
            elem.unwrap_optional().kind().name()
        )));
    }

    let items = read_items(record, name, elem, marshaller)?;
    assemble(target, items)
}

fn read_items(
    record: &Record,
    name: &str,
    elem: &'static TypeDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Vec<Box<dyn Reflect>>, MarshalError> {
    let kind = match record.shape().field(name) {
        Some(def) => def.kind(),
        None => return Err(RecordError::NoSuchField(name.to_owned()).into()),
    };
    let mut items = Vec::new();
    match kind {
        FieldKind::ScalarArray => {
            for (index, value) in read_scalars(record, name)?.iter().enumerate() {
                let _guard = field_path::enter_index(index);
                items.push(scalar::from_scalar(value, elem)?);
            }
        }
        FieldKind::RecordArray => {
            for (index, child) in read_records(record, name)?.into_iter().enumerate() {
                let _guard = field_path::enter_index(index);
                items.push(record::read_object(child, Some(elem), marshaller)?);
            }
        }
        FieldKind::UnionArray => {
            for (index, child) in read_unions(record, name)?.into_iter().enumerate() {
                let _guard = field_path::enter_index(index);
                match union::read_union(child, elem, marshaller)? {
                    Some(value) => items.push(value),
                    None => {
                        return Err(MarshalError::type_mismatch(format_args!(
                            "an empty union cannot be read as `{}`",
                            elem.type_name()
                        )));
                    }
                }
            }
        }
        kind => {
            return Err(MarshalError::type_mismatch(format_args!(
                "{kind} field `{name}` is not an array"
            )));
        }
    }
    Ok(items)
}

fn assemble(target: &'static TypeDesc, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, MarshalError> {
    match target.kind() {
        DescKind::Array(array) => {
            if let Some(len) = array.len()
                && len != items.len()
            {
                return Err(MarshalError::type_mismatch(format_args!(
                    "`{}` holds {len} elements, the field has {}",
                    target.type_name(),
                    items.len()
                )));
            }
            array.from_items(items).map_err(|_| {
                MarshalError::type_mismatch(format_args!("elements do not fit `{}`", target.type_name()))
            })
        }
        DescKind::List(desc) => {
            let Some(mut list) = desc.new_list() else {
                return Err(MarshalError::unsupported(format_args!(
                    "cannot instantiate `{}`",
                    target.type_name()
                )));
            };
            for item in items {
                list.push(item).map_err(|item| {
                    MarshalError::type_mismatch(format_args!(
                        "`{}` cannot be added to `{}`",
                        item.reflect_type_desc().type_name(),
                        target.type_name()
                    ))
                })?;
            }
            let list: Box<dyn Reflect> = list;
            Ok(list)
        }
        _ => {
            let mut list = DynamicList::with_capacity(items.len());
            for item in items {
                list.extend_boxed(item);
            }
            Ok(list.into_boxed_reflect())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use recast_record::{CHUNK_LEN, Record, ScalarKind, ScalarSlice, Shape};
    use recast_reflect::info::Typed;
    use recast_reflect::ops::{DynamicList, DynamicMap};

    use super::{check_progress, read_into, read_scalars};
    use crate::{MarshalError, Marshaller, Registry};

    fn long_record(len: i64) -> Record {
        let mut builder = Shape::builder();
        builder.add_scalar_array("values", ScalarKind::Long).unwrap();
        let mut record = Record::new(&builder.build());
        let values: Vec<i64> = (0..len).collect();
        let mut offset = 0;
        while offset < values.len() {
            offset += record
                .put_array("values", offset, ScalarSlice::Long(&values[offset..]))
                .unwrap();
        }
        record
    }

    #[test]
    fn reads_every_chunk() {
        let len = CHUNK_LEN as i64 * 2 + 7;
        let record = long_record(len);
        let scalars = read_scalars(&record, "values").unwrap();
        assert_eq!(scalars.len() as i64, len);
        assert_eq!(scalars.last().and_then(|s| s.as_i64()), Some(len - 1));
    }

    #[test]
    fn target_decides_the_container() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);
        let record = long_record(3);

        let value = read_into(&record, "values", <VecDeque<i64> as Typed>::type_desc(), &marshaller).unwrap();
        assert_eq!(value.downcast_ref::<VecDeque<i64>>(), Some(&VecDeque::from([0, 1, 2])));

        let value = read_into(&record, "values", <[Option<i64>; 3] as Typed>::type_desc(), &marshaller).unwrap();
        assert_eq!(value.downcast_ref::<[Option<i64>; 3]>(), Some(&[Some(0), Some(1), Some(2)]));

        let value = read_into(&record, "values", <Box<[f64]> as Typed>::type_desc(), &marshaller).unwrap();
        assert_eq!(value.downcast_ref::<Box<[f64]>>().map(|v| v.len()), Some(3));

        let err = read_into(&record, "values", <[i64; 4] as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::TypeMismatch(_)));

        let err = read_into(&record, "values", <Vec<bool> as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::TypeMismatch(_)));
    }

    #[test]
    fn nested_containers_are_not_array_targets() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);
        let record = long_record(2);

        let err = read_into(&record, "values", <Vec<Vec<i32>> as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));

        let err = read_into(&record, "values", <Vec<DynamicMap> as Typed>::type_desc(), &marshaller).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));
    }

    #[test]
    fn stalled_reads_fail() {
        assert!(check_progress("values", 3, 0, 10).is_ok());
        assert!(check_progress("values", 7, 3, 10).is_ok());

        let err = check_progress("values", 0, 3, 10).unwrap_err();
        assert!(matches!(err, MarshalError::Custom(_)));
        assert!(check_progress("values", 8, 3, 10).is_err());
    }

    #[test]
    fn generic_targets_follow_the_registry() {
        let record = long_record(2);
        let dynamic = <DynamicList as Typed>::type_desc().as_list().unwrap().elem();

        let registry = Registry::new();
        let value = read_into(&record, "values", dynamic, &Marshaller::new(&registry)).unwrap();
        let list = value.downcast_ref::<DynamicList>().unwrap();
        assert_eq!(list.get_as::<i64>(1), Some(&1));

        let registry = Registry::builder().generic_sequences(false).build();
        let err = read_into(&record, "values", dynamic, &Marshaller::new(&registry)).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));
    }
}
