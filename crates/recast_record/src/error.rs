use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Failures reported by the get/put primitives of [`Record`](crate::Record),
/// [`Union`](crate::Union) and [`ShapeBuilder`](crate::ShapeBuilder).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("Record has no field named `{0}`")]
    NoSuchField(String),

    #[error("Field `{field}` is declared as {declared}, but was accessed as {requested}")]
    KindMismatch {
        field: String,
        declared: String,
        requested: String,
    },

    #[error("Field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("Offset {offset} is past the end of field `{field}` (length {len})")]
    OutOfBounds {
        field: String,
        offset: usize,
        len: usize,
    },

    #[error("Union has no member accepting {0}")]
    NotAMember(String),
}
