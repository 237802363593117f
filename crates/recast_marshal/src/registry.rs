use core::any::TypeId;
use core::fmt;

use recast_record::{Record, Shape};
use recast_reflect::Reflect;
use recast_reflect::info::{TypeDesc, Typed};
use recast_utils::TypeIdMap;
use recast_utils::hash::HashMap;

use crate::{MarshalError, Marshaller};

// -----------------------------------------------------------------------------
// Custom conversions

/// A user-supplied replacement for the default traversal of one native type.
///
/// When a converter is registered for a type, both the shape and the values
/// of its Records come exclusively from the converter, and the type's own
/// fields are never visited.
///
/// # Examples
///
/// ```
/// use recast_marshal::{CustomConverter, MarshalError, Marshaller, Registry};
/// use recast_record::{Record, Scalar, ScalarKind, Shape};
/// use recast_reflect::{Reflect, derive::Reflect};
///
/// #[derive(Reflect)]
/// struct Celsius {
///     degrees: f64,
/// }
///
/// struct AsKelvin;
///
/// impl CustomConverter for AsKelvin {
///     fn build_shape(&self, _: &dyn Reflect, _: &Marshaller<'_>) -> Result<Shape, MarshalError> {
///         let mut builder = Shape::builder();
///         builder.add_scalar("kelvin", ScalarKind::Double)?;
///         Ok(builder.build())
///     }
///
///     fn populate(
///         &self,
///         value: &dyn Reflect,
///         record: &mut Record,
///         _: &Marshaller<'_>,
///     ) -> Result<(), MarshalError> {
///         let celsius = value
///             .downcast_ref::<Celsius>()
///             .ok_or_else(|| MarshalError::custom("expected Celsius"))?;
///         record.put_scalar("kelvin", Scalar::Double(celsius.degrees + 273.15))?;
///         Ok(())
///     }
/// }
///
/// let registry = Registry::builder()
///     .register_converter::<Celsius>(AsKelvin)
///     .build();
/// let record = Marshaller::new(&registry).serialize(&Celsius { degrees: 0.0 }).unwrap();
/// assert_eq!(record.get_scalar("kelvin").unwrap(), &Scalar::Double(273.15));
/// assert!(record.shape().field("degrees").is_none());
/// ```
pub trait CustomConverter: Send + Sync + 'static {
    /// Declares the fields of the Record produced for `value`.
    fn build_shape(&self, value: &dyn Reflect, marshaller: &Marshaller<'_>) -> Result<Shape, MarshalError>;

    /// Writes the values of `value` into a Record of the shape returned by
    /// [`build_shape`](CustomConverter::build_shape).
    fn populate(
        &self,
        value: &dyn Reflect,
        record: &mut Record,
        marshaller: &Marshaller<'_>,
    ) -> Result<(), MarshalError>;
}

/// A user-supplied replacement for the default reconstruction of Records
/// carrying one type identifier.
pub trait CustomDeserializer: Send + Sync + 'static {
    fn deserialize(&self, record: &Record, marshaller: &Marshaller<'_>) -> Result<Box<dyn Reflect>, MarshalError>;
}

impl<F> CustomDeserializer for F
where
    F: Fn(&Record, &Marshaller<'_>) -> Result<Box<dyn Reflect>, MarshalError> + Send + Sync + 'static,
{
    #[inline]
    fn deserialize(&self, record: &Record, marshaller: &Marshaller<'_>) -> Result<Box<dyn Reflect>, MarshalError> {
        self(record, marshaller)
    }
}

// -----------------------------------------------------------------------------
// Registry

/// The immutable configuration of a [`Marshaller`].
///
/// Built once through [`RegistryBuilder`] and shared by reference, so any
/// number of marshallers on any number of threads can read it.
///
/// # Examples
///
/// ```
/// use recast_marshal::Registry;
///
/// let registry = Registry::builder()
///     .ignore_unknown_fields(true)
///     .type_id_key("kind")
///     .build();
///
/// assert!(registry.ignore_unknown_fields());
/// assert_eq!(registry.type_id_key(), Some("kind"));
/// assert!(registry.generic_sequences());
/// ```
pub struct Registry {
    converters: TypeIdMap<Box<dyn CustomConverter>>,
    deserializers: HashMap<String, Box<dyn CustomDeserializer>>,
    type_ids: TypeIdMap<String>,
    registered: HashMap<String, &'static TypeDesc>,
    ignore_unknown_fields: bool,
    type_id_key: Option<String>,
    generic_sequences: bool,
}

impl Registry {
    /// A registry without registrations and with the default policies.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The converter registered for the type `type_id`.
    #[inline]
    pub fn converter(&self, type_id: TypeId) -> Option<&dyn CustomConverter> {
        self.converters.get(&type_id).map(|c| &**c)
    }

    /// The deserializer registered for the type identifier `id`.
    #[inline]
    pub fn deserializer(&self, id: &str) -> Option<&dyn CustomDeserializer> {
        self.deserializers.get(id).map(|d| &**d)
    }

    /// The type identifier written into Records built from `type_id`.
    #[inline]
    pub fn type_id_of(&self, type_id: TypeId) -> Option<&str> {
        self.type_ids.get(&type_id).map(String::as_str)
    }

    /// The native type Records carrying `id` are read into by default.
    #[inline]
    pub fn registered_type(&self, id: &str) -> Option<&'static TypeDesc> {
        self.registered.get(id).copied()
    }

    /// Whether Record fields without native counterpart are skipped.
    ///
    /// Off by default: such fields fail with [`MarshalError::MissingAccessor`].
    #[inline]
    pub const fn ignore_unknown_fields(&self) -> bool {
        self.ignore_unknown_fields
    }

    /// The map key whose string value becomes the Record's type identifier.
    #[inline]
    pub fn type_id_key(&self) -> Option<&str> {
        self.type_id_key.as_deref()
    }

    /// Whether array fields read without a concrete target become a
    /// [`DynamicList`](recast_reflect::ops::DynamicList).
    ///
    /// On by default. When off, such reads fail with
    /// [`MarshalError::UnsupportedType`].
    #[inline]
    pub const fn generic_sequences(&self) -> bool {
        self.generic_sequences
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            converters: TypeIdMap::new(),
            deserializers: HashMap::default(),
            type_ids: TypeIdMap::new(),
            registered: HashMap::default(),
            ignore_unknown_fields: false,
            type_id_key: None,
            generic_sequences: true,
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("converters", &self.converters.len())
            .field("deserializers", &self.deserializers.keys().collect::<Vec<_>>())
            .field("type_ids", &self.type_ids.values().collect::<Vec<_>>())
            .field("registered", &self.registered)
            .field("ignore_unknown_fields", &self.ignore_unknown_fields)
            .field("type_id_key", &self.type_id_key)
            .field("generic_sequences", &self.generic_sequences)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// RegistryBuilder

/// Builder of a [`Registry`].
///
/// Registering twice for the same type or identifier keeps the last
/// registration and logs a warning.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default traversal of `T` with `converter`.
    pub fn register_converter<T: Typed>(mut self, converter: impl CustomConverter) -> Self {
        if self.registry.converters.insert_type::<T>(Box::new(converter)).is_some() {
            log::warn!("replacing the custom converter of `{}`", T::type_desc().type_name());
        }
        self
    }

    /// Reads every Record identified by `id` through `deserializer`.
    pub fn register_deserializer(mut self, id: impl Into<String>, deserializer: impl CustomDeserializer) -> Self {
        let id = id.into();
        if self.registry.deserializers.contains_key(&id) {
            log::warn!("replacing the custom deserializer of `{id}`");
        }
        self.registry.deserializers.insert(id, Box::new(deserializer));
        self
    }

    /// Writes `id` as the type identifier of every Record built from a `T`.
    pub fn register_type_id<T: Typed>(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if let Some(old) = self.registry.type_ids.insert_type::<T>(id) {
            log::warn!(
                "replacing the type identifier `{old}` of `{}`",
                T::type_desc().type_name()
            );
        }
        self
    }

    /// Binds `T` and `id` both ways: Records built from a `T` carry `id`, and
    /// Records carrying `id` are read as `T` when no target is given.
    pub fn register_type<T: Typed>(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if let Some(old) = self.registry.registered.insert(id.clone(), T::type_desc()) {
            log::warn!("replacing `{}` as the type of `{id}`", old.type_name());
        }
        self.register_type_id::<T>(id)
    }

    /// See [`Registry::ignore_unknown_fields`].
    #[inline]
    pub fn ignore_unknown_fields(mut self, ignore: bool) -> Self {
        self.registry.ignore_unknown_fields = ignore;
        self
    }

    /// See [`Registry::type_id_key`].
    #[inline]
    pub fn type_id_key(mut self, key: impl Into<String>) -> Self {
        self.registry.type_id_key = Some(key.into());
        self
    }

    /// See [`Registry::generic_sequences`].
    #[inline]
    pub fn generic_sequences(mut self, enabled: bool) -> Self {
        self.registry.generic_sequences = enabled;
        self
    }

    #[inline]
    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use recast_reflect::ops::DynamicMap;

    use super::Registry;

    #[test]
    fn register_type_binds_both_directions() {
        let registry = Registry::builder().register_type::<DynamicMap>("bag").build();

        assert_eq!(registry.type_id_of(TypeId::of::<DynamicMap>()), Some("bag"));
        assert!(registry.registered_type("bag").unwrap().is::<DynamicMap>());
        assert!(registry.registered_type("other").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let registry = Registry::builder()
            .register_type_id::<i32>("first")
            .register_type_id::<i32>("second")
            .build();
        assert_eq!(registry.type_id_of(TypeId::of::<i32>()), Some("second"));
    }

    #[test]
    fn defaults() {
        let registry = Registry::new();
        assert!(!registry.ignore_unknown_fields());
        assert!(registry.generic_sequences());
        assert_eq!(registry.type_id_key(), None);
        assert!(registry.deserializer("any").is_none());
    }
}
