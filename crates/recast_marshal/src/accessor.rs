//! Field lookup by name, subject to the unknown-field policy.
//!
//! Fields are found through the [`RecordDesc`] and [`Object`] a type derives,
//! so a lookup is an exact match on the reflected field name.
//!
//! [`RecordDesc`]: recast_reflect::info::RecordDesc

use recast_reflect::Reflect;
use recast_reflect::info::{FieldDesc, TypeDesc};
use recast_reflect::ops::Object;

use crate::{MarshalError, Registry};

/// Finds the writable field `name` of the record type `desc`.
///
/// Returns `Ok(None)` for an unknown field if the registry ignores unknown
/// fields, and [`MarshalError::MissingAccessor`] otherwise.
///
/// # Examples
///
/// ```
/// use recast_marshal::{MarshalError, Registry, accessor::resolve_setter};
/// use recast_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Pet {
///     name: String,
/// }
///
/// let strict = Registry::new();
/// let field = resolve_setter(Pet::type_desc(), "name", &strict).unwrap();
/// assert!(field.unwrap().desc().is::<String>());
///
/// let err = resolve_setter(Pet::type_desc(), "age", &strict).unwrap_err();
/// assert!(matches!(err, MarshalError::MissingAccessor(_)));
///
/// let lenient = Registry::builder().ignore_unknown_fields(true).build();
/// assert!(resolve_setter(Pet::type_desc(), "age", &lenient).unwrap().is_none());
/// ```
pub fn resolve_setter(
    desc: &'static TypeDesc,
    name: &str,
    registry: &Registry,
) -> Result<Option<&'static FieldDesc>, MarshalError> {
    match desc.as_record().and_then(|record| record.field(name)) {
        Some(field) => Ok(Some(field)),
        None => unknown_field(desc, name, registry),
    }
}

/// Finds the readable field `name` of `object`.
///
/// Follows the same unknown-field policy as [`resolve_setter`].
pub fn resolve_getter<'a>(
    object: &'a dyn Object,
    name: &str,
    registry: &Registry,
) -> Result<Option<&'a dyn Reflect>, MarshalError> {
    match object.field(name) {
        Some(value) => Ok(Some(value)),
        None => unknown_field(object.reflect_type_desc(), name, registry),
    }
}

fn unknown_field<T>(desc: &TypeDesc, name: &str, registry: &Registry) -> Result<Option<T>, MarshalError> {
    if registry.ignore_unknown_fields() {
        log::debug!("skipping unknown field `{name}` of `{}`", desc.type_name());
        Ok(None)
    } else {
        Err(MarshalError::missing_accessor(format_args!(
            "`{}` has no field `{name}`",
            desc.type_name()
        )))
    }
}
