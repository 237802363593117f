//! Conversion of string-keyed maps to and from Records.
//!
//! Entries become fields in the map's own iteration order. With a
//! [type-id key](crate::Registry::type_id_key) configured, an entry under that
//! key holding a string is not a field: it names the Record instead.

use recast_record::{Record, Shape};
use recast_reflect::Reflect;
use recast_reflect::info::{NativeScalar, TypeDesc};
use recast_reflect::ops::{Map, ScalarRef};

use crate::{MarshalError, Marshaller, Registry, field_path, record};

/// Declares one field per present entry of `map`.
///
/// `value` is `map` itself, seen as a plain reflected value.
pub fn build_shape(value: &dyn Reflect, map: &dyn Map, marshaller: &Marshaller<'_>) -> Result<Shape, MarshalError> {
    let registry = marshaller.registry();
    let mut builder = Shape::builder();
    if let Some(id) = registry.type_id_of(value.ty_id()) {
        builder.set_id(id);
    }
    for (key, item) in map.iter() {
        let key = key_str(value, key)?;
        if let Some(id) = type_id_entry(registry, key, item) {
            builder.set_id(id);
            continue;
        }
        let _guard = field_path::enter(key);
        let Some(class) = marshaller.classify(item)? else {
            continue;
        };
        builder.add(key, record::field_type(item, class, marshaller)?)?;
    }
    Ok(builder.build())
}

/// Writes the entries of `map` into a Record of the shape returned by
/// [`build_shape`].
pub fn populate(
    value: &dyn Reflect,
    map: &dyn Map,
    record: &mut Record,
    marshaller: &Marshaller<'_>,
) -> Result<(), MarshalError> {
    let registry = marshaller.registry();
    for (key, item) in map.iter() {
        let key = key_str(value, key)?;
        if type_id_entry(registry, key, item).is_some() {
            continue;
        }
        let _guard = field_path::enter(key);
        let Some(class) = marshaller.classify(item)? else {
            continue;
        };
        if record.shape().field(key).is_none() {
            return Err(record::undeclared(key));
        }
        record::populate_field(item, class, record, key, marshaller)?;
    }
    Ok(())
}

/// Reads `record` into a new map of type `target`, one entry per field.
///
/// Values are read as the map's value type. The Record's type identifier is
/// not put back into the map.
pub fn read_map(
    record: &Record,
    target: &'static TypeDesc,
    marshaller: &Marshaller<'_>,
) -> Result<Box<dyn Reflect>, MarshalError> {
    let Some(desc) = target.as_map() else {
        return Err(MarshalError::type_mismatch(format_args!(
            "`{}` is not a map",
            target.type_name()
        )));
    };
    if desc.key().as_scalar() != Some(NativeScalar::String) {
        return Err(MarshalError::key_type(format_args!(
            "`{}` is keyed by `{}`",
            target.type_name(),
            desc.key().type_name()
        )));
    }
    let Some(mut map) = desc.new_map() else {
        return Err(MarshalError::unsupported(format_args!(
            "cannot instantiate `{}`",
            target.type_name()
        )));
    };

    let value_desc = desc.value();
    for def in record.fields() {
        let name = def.name();
        let _guard = field_path::enter(name);
        let Some(value) = record::read_field(record, name, value_desc, marshaller)? else {
            continue;
        };
        map.insert(name.to_owned().into_boxed_reflect(), value)
            .map_err(|(_, value)| {
                MarshalError::type_mismatch(format_args!(
                    "`{}` cannot be stored in `{}`",
                    value.reflect_type_desc().type_name(),
                    target.type_name()
                ))
            })?;
    }
    let map: Box<dyn Reflect> = map;
    Ok(map)
}

fn key_str<'a>(map: &dyn Reflect, key: &'a dyn Reflect) -> Result<&'a str, MarshalError> {
    match key.downcast_ref::<String>() {
        Some(key) => Ok(key.as_str()),
        None => Err(MarshalError::key_type(format_args!(
            "`{}` has a `{}` key",
            map.reflect_type_desc().type_name(),
            key.reflect_type_desc().type_name()
        ))),
    }
}

/// The string stored under the configured type-id key.
fn type_id_entry<'a>(registry: &Registry, key: &str, item: &'a dyn Reflect) -> Option<&'a str> {
    if registry.type_id_key() != Some(key) {
        return None;
    }
    match item.as_scalar() {
        Some(ScalarRef::Str(id)) => Some(id),
        _ => None,
    }
}
