use core::fmt;
use std::sync::Arc;

use recast_utils::hash::HashMap;

use crate::{RecordError, ScalarKind};

// -----------------------------------------------------------------------------
// FieldKind

/// The payload-free discriminant of a [`FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    ScalarArray,
    Record,
    RecordArray,
    Union,
    UnionArray,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::ScalarArray => "scalar array",
            Self::Record => "record",
            Self::RecordArray => "record array",
            Self::Union => "union",
            Self::UnionArray => "union array",
        })
    }
}

// -----------------------------------------------------------------------------
// FieldType

/// The declared type of one field. Fixed when the shape is built.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Scalar(ScalarKind),
    ScalarArray(ScalarKind),
    Record(Shape),
    RecordArray(Shape),
    Union(UnionType),
    UnionArray(UnionType),
}

impl FieldType {
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) => FieldKind::Scalar,
            Self::ScalarArray(_) => FieldKind::ScalarArray,
            Self::Record(_) => FieldKind::Record,
            Self::RecordArray(_) => FieldKind::RecordArray,
            Self::Union(_) => FieldKind::Union,
            Self::UnionArray(_) => FieldKind::UnionArray,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Scalar(kind) => kind.to_string(),
            Self::ScalarArray(kind) => format!("{kind} array"),
            other => other.kind().to_string(),
        }
    }
}

/// The member list of a union field.
///
/// A variant union accepts any value and resolves its kind when the value is
/// set. A regular union only accepts the members it was declared with.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionType {
    Variant,
    Regular(Vec<FieldDef>),
}

impl UnionType {
    #[inline]
    pub const fn is_variant(&self) -> bool {
        matches!(self, Self::Variant)
    }
}

// -----------------------------------------------------------------------------
// FieldDef

/// A named field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: String,
    ty: FieldType,
}

impl FieldDef {
    #[inline]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.ty.kind()
    }
}

// -----------------------------------------------------------------------------
// Shape

struct ShapeData {
    id: Option<String>,
    fields: Vec<FieldDef>,
    index: HashMap<String, usize>,
}

/// The immutable layout of a [`Record`](crate::Record).
///
/// Cloning a shape only bumps a reference count.
///
/// # Examples
///
/// ```
/// use recast_record::{FieldKind, ScalarKind, Shape};
///
/// let mut inner = Shape::builder();
/// inner.add_scalar("name", ScalarKind::String).unwrap();
/// let inner = inner.build();
///
/// let mut outer = Shape::builder();
/// outer.add_record("owner", inner).unwrap();
/// outer.add_scalar_array("scores", ScalarKind::Double).unwrap();
/// let outer = outer.build();
///
/// let kinds: Vec<_> = outer.fields().iter().map(|f| f.kind()).collect();
/// assert_eq!(kinds, [FieldKind::Record, FieldKind::ScalarArray]);
/// assert!(outer.id().is_none());
/// ```
#[derive(Clone)]
pub struct Shape(Arc<ShapeData>);

impl Shape {
    /// Starts building a new shape.
    #[inline]
    pub fn builder() -> ShapeBuilder {
        ShapeBuilder::new()
    }

    /// The type identifier, if one was set.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.0.id.as_deref()
    }

    /// All field declarations, in insertion order.
    #[inline]
    pub fn fields(&self) -> &[FieldDef] {
        &self.0.fields
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.index_of(name).map(|index| &self.0.fields[index])
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.index.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.fields.is_empty()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (self.0.id == other.0.id && self.0.fields == other.0.fields)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.0.id)
            .field("fields", &self.0.fields)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ShapeBuilder

/// Accepts field declarations in order and yields a [`Shape`].
#[derive(Default, Debug)]
pub struct ShapeBuilder {
    id: Option<String>,
    fields: Vec<FieldDef>,
    index: HashMap<String, usize>,
}

impl ShapeBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type identifier, replacing any previous one.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns `true` if a field called `name` was already declared.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declares a field.
    ///
    /// Fails with [`RecordError::DuplicateField`] if the name is taken.
    pub fn add(&mut self, name: impl Into<String>, ty: FieldType) -> Result<&mut Self, RecordError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RecordError::DuplicateField(name));
        }
        self.index.insert(name.clone(), self.fields.len());
        self.fields.push(FieldDef { name, ty });
        Ok(self)
    }

    #[inline]
    pub fn add_scalar(
        &mut self,
        name: impl Into<String>,
        kind: ScalarKind,
    ) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::Scalar(kind))
    }

    #[inline]
    pub fn add_scalar_array(
        &mut self,
        name: impl Into<String>,
        kind: ScalarKind,
    ) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::ScalarArray(kind))
    }

    #[inline]
    pub fn add_record(&mut self, name: impl Into<String>, shape: Shape) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::Record(shape))
    }

    #[inline]
    pub fn add_record_array(
        &mut self,
        name: impl Into<String>,
        shape: Shape,
    ) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::RecordArray(shape))
    }

    #[inline]
    pub fn add_union(&mut self, name: impl Into<String>, ty: UnionType) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::Union(ty))
    }

    #[inline]
    pub fn add_union_array(
        &mut self,
        name: impl Into<String>,
        ty: UnionType,
    ) -> Result<&mut Self, RecordError> {
        self.add(name, FieldType::UnionArray(ty))
    }

    /// Freezes the declarations into a [`Shape`].
    pub fn build(self) -> Shape {
        Shape(Arc::new(ShapeData {
            id: self.id,
            fields: self.fields,
            index: self.index,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldType, Shape, UnionType};
    use crate::{RecordError, ScalarKind};

    #[test]
    fn duplicate_names_are_rejected() {
        let mut builder = Shape::builder();
        builder.add_scalar("a", ScalarKind::Int).unwrap();
        let err = builder.add_union("a", UnionType::Variant).unwrap_err();
        assert_eq!(err, RecordError::DuplicateField("a".into()));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn fields_keep_insertion_order() {
        let mut builder = Shape::builder();
        for name in ["z", "a", "m"] {
            builder.add_scalar(name, ScalarKind::Boolean).unwrap();
        }
        builder.set_id("Sorted");
        let shape = builder.build();

        let names: Vec<_> = shape.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(shape.index_of("m"), Some(2));
        assert_eq!(shape.id(), Some("Sorted"));
        assert_eq!(shape.field("a").map(|f| f.ty()), Some(&FieldType::Scalar(ScalarKind::Boolean)));
    }
}
