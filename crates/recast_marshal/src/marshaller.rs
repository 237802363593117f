use recast_record::{Record, Shape};
use recast_reflect::info::{TypeDesc, Typed};
use recast_reflect::ops::ReflectRef;
use recast_reflect::{FromReflect, Reflect};

use crate::classify::{self, FieldClass};
use crate::{MarshalError, Registry, map, record};

// -----------------------------------------------------------------------------
// Marshaller

/// Converts reflected values to [`Record`]s and back.
///
/// A `Marshaller` only borrows its [`Registry`], it is `Copy` and can be
/// created per call.
///
/// # Examples
///
/// ```
/// use recast_marshal::{Marshaller, Registry};
/// use recast_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[reflect(default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let registry = Registry::builder().register_type::<Point>("Point").build();
/// let marshaller = Marshaller::new(&registry);
///
/// let record = marshaller.serialize(&Point { x: 1, y: -1 }).unwrap();
/// assert_eq!(record.id(), Some("Point"));
///
/// let point: Point = marshaller.deserialize_as(&record).unwrap();
/// assert_eq!(point, Point { x: 1, y: -1 });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Marshaller<'a> {
    registry: &'a Registry,
}

impl<'a> Marshaller<'a> {
    #[inline]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Builds the shape of `value`, creates a Record of it and fills it.
    ///
    /// `value` must be a struct or a string-keyed map, possibly wrapped in
    /// `Some`, or a type with a registered custom converter.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<Record, MarshalError> {
        let shape = self.build_shape(value)?;
        let mut record = Record::new(&shape);
        self.populate(value, &mut record)?;
        Ok(record)
    }

    /// The shape pass of [`serialize`](Marshaller::serialize).
    pub fn build_shape(&self, value: &dyn Reflect) -> Result<Shape, MarshalError> {
        let value = peel(value);
        if let Some(converter) = self.registry.converter(value.ty_id()) {
            log::debug!(
                "custom converter builds the shape of `{}`",
                value.reflect_type_desc().type_name()
            );
            return converter.build_shape(value, self);
        }
        match value.reflect_ref() {
            ReflectRef::Object(object) => record::build_shape(object, self),
            ReflectRef::Map(map) => map::build_shape(value, map, self),
            other => Err(not_a_record(value, other)),
        }
    }

    /// The value pass of [`serialize`](Marshaller::serialize), `record` must
    /// have the shape [`build_shape`](Marshaller::build_shape) returned.
    pub fn populate(&self, value: &dyn Reflect, record: &mut Record) -> Result<(), MarshalError> {
        let value = peel(value);
        if let Some(converter) = self.registry.converter(value.ty_id()) {
            log::debug!(
                "custom converter populates `{}`",
                value.reflect_type_desc().type_name()
            );
            return converter.populate(value, record, self);
        }
        match value.reflect_ref() {
            ReflectRef::Object(object) => record::populate(object, record, self),
            ReflectRef::Map(map) => map::populate(value, map, record, self),
            other => Err(not_a_record(value, other)),
        }
    }

    /// Classifies a field value, `None` when it is absent.
    ///
    /// A value with a custom converter is a nested Record whatever its kind,
    /// and a sequence of such values a record array.
    pub fn classify(&self, value: &dyn Reflect) -> Result<Option<FieldClass>, MarshalError> {
        let view = value.reflect_ref();
        match view {
            ReflectRef::Absent => return Ok(None),
            ReflectRef::Array(_) | ReflectRef::List(_) => {
                if self.converts_elements(value, view) {
                    return Ok(Some(FieldClass::RecordArray));
                }
            }
            _ => {
                if self.registry.converter(peel(value).ty_id()).is_some() {
                    return Ok(Some(FieldClass::Record));
                }
            }
        }
        classify::classify_value(value)
    }

    fn converts_elements(&self, value: &dyn Reflect, view: ReflectRef<'_>) -> bool {
        let Some(elem) = classify::element_desc(value.reflect_type_desc()) else {
            return false;
        };
        let elem = elem.unwrap_optional();
        if self.registry.converter(elem.type_id()).is_some() {
            return true;
        }
        if !elem.is_dynamic() {
            return false;
        }
        let first = match view {
            ReflectRef::Array(array) => array.iter().next(),
            ReflectRef::List(list) => list.iter().next(),
            _ => None,
        };
        first.is_some_and(|first| self.registry.converter(peel(first).ty_id()).is_some())
    }

    /// Reconstructs a value from `record`.
    ///
    /// See [`record::read_object`] for how the type to build is chosen when
    /// `target` is `None`.
    #[inline]
    pub fn deserialize(
        &self,
        record: &Record,
        target: Option<&'static TypeDesc>,
    ) -> Result<Box<dyn Reflect>, MarshalError> {
        record::read_object(record, target, self)
    }

    /// Reconstructs a `T` from `record`.
    pub fn deserialize_as<T: FromReflect + Typed>(&self, record: &Record) -> Result<T, MarshalError> {
        let value = self.deserialize(record, Some(T::type_desc()))?;
        T::take_reflect(value).map_err(|value| {
            MarshalError::type_mismatch(format_args!(
                "record was read as `{}`, not `{}`",
                value.reflect_type_desc().type_name(),
                T::type_desc().type_name()
            ))
        })
    }
}

/// Sees through `Option` wrappers, so converters get the payload.
fn peel(value: &dyn Reflect) -> &dyn Reflect {
    match value.reflect_ref() {
        ReflectRef::Object(object) => object as &dyn Reflect,
        ReflectRef::Map(map) => map as &dyn Reflect,
        ReflectRef::TaggedUnion(union) => union as &dyn Reflect,
        _ => value,
    }
}

#[cold]
fn not_a_record(value: &dyn Reflect, view: ReflectRef<'_>) -> MarshalError {
    let name = value.reflect_type_desc().type_name();
    match view {
        ReflectRef::TaggedUnion(_) => MarshalError::union_kind(format_args!("`{name}` is a regular union")),
        other => MarshalError::unsupported(format_args!(
            "{} value `{name}` cannot become a record",
            other.kind_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use recast_reflect::derive::Reflect;

    use crate::{MarshalError, Marshaller, Registry};

    #[derive(Reflect)]
    enum Mode {
        On,
        Off,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Inner {
        level: i8,
    }

    #[test]
    fn only_structs_and_maps_become_records() {
        let registry = Registry::new();
        let marshaller = Marshaller::new(&registry);

        let err = marshaller.serialize(&7_i32).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType(_)));

        for mode in [Mode::On, Mode::Off] {
            let err = marshaller.serialize(&mode).unwrap_err();
            assert!(matches!(err, MarshalError::UnionKindError(_)));
        }

        let record = marshaller.serialize(&Some(Inner { level: 2 })).unwrap();
        assert_eq!(record.len(), 1);
        assert!(marshaller.serialize(&None::<Inner>).is_err());
    }
}
