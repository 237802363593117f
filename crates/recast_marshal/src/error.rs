use core::fmt::Display;

use recast_record::RecordError;
use thiserror::Error;

use crate::field_path;

// -----------------------------------------------------------------------------
// Error

/// Failures of a [`Marshaller`](crate::Marshaller) conversion.
///
/// A conversion stops at the first failure and returns it unchanged through
/// the whole traversal, nothing is retried and no partial value is returned.
///
/// With the `debug` feature (and `debug_assertions`), messages end with the
/// field path at which the failure was raised, e.g. ``(at `orders[2].price`)``.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarshalError {
    /// A value or declared type maps to no Record field kind.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A field has no counterpart on the native type and unknown fields are
    /// not ignored.
    #[error("Missing accessor: {0}")]
    MissingAccessor(String),

    /// The stored kind of a field disagrees with the declared native type.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// A map is not keyed by strings.
    #[error("Map keys must be strings: {0}")]
    KeyTypeError(String),

    /// A regular (non-variant) union was encountered.
    #[error("Only variant unions are supported: {0}")]
    UnionKindError(String),

    /// A string of several characters was read into a `char`.
    #[error("Character overflow: {0}")]
    CharacterOverflow(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    /// Raised by user converters, see [`MarshalError::custom`].
    #[error("{0}")]
    Custom(String),
}

impl MarshalError {
    /// Creates an error for custom converters and deserializers.
    #[cold]
    pub fn custom(msg: impl Display) -> Self {
        Self::Custom(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn unsupported(msg: impl Display) -> Self {
        Self::UnsupportedType(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn missing_accessor(msg: impl Display) -> Self {
        Self::MissingAccessor(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn type_mismatch(msg: impl Display) -> Self {
        Self::TypeMismatch(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn key_type(msg: impl Display) -> Self {
        Self::KeyTypeError(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn union_kind(msg: impl Display) -> Self {
        Self::UnionKindError(field_path::decorate(msg))
    }

    #[cold]
    pub(crate) fn character_overflow(msg: impl Display) -> Self {
        Self::CharacterOverflow(field_path::decorate(msg))
    }
}
