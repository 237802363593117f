use crate::{FieldKind, FieldType, Record, RecordError, Scalar, ScalarArray, UnionType};

// -----------------------------------------------------------------------------
// UnionValue

/// The value currently held by a [`Union`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnionValue {
    Scalar(Scalar),
    ScalarArray(ScalarArray),
    Record(Record),
    RecordArray(Vec<Record>),
}

impl UnionValue {
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) => FieldKind::Scalar,
            Self::ScalarArray(_) => FieldKind::ScalarArray,
            Self::Record(_) => FieldKind::Record,
            Self::RecordArray(_) => FieldKind::RecordArray,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Scalar(v) => v.kind().to_string(),
            Self::ScalarArray(v) => format!("{} array", v.kind()),
            other => other.kind().to_string(),
        }
    }

    fn fits(&self, ty: &FieldType) -> bool {
        match (self, ty) {
            (Self::Scalar(v), FieldType::Scalar(kind)) => v.kind() == *kind,
            (Self::ScalarArray(v), FieldType::ScalarArray(kind)) => v.kind() == *kind,
            (Self::Record(_), FieldType::Record(_)) => true,
            (Self::RecordArray(_), FieldType::RecordArray(_)) => true,
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Union

/// A union field value.
///
/// # Examples
///
/// ```
/// use recast_record::{Scalar, Union, UnionValue};
///
/// let mut union = Union::variant();
/// assert!(union.get().is_none());
///
/// union.set(UnionValue::Scalar(Scalar::Long(7))).unwrap();
/// assert_eq!(union.get(), Some(&UnionValue::Scalar(Scalar::Long(7))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    ty: UnionType,
    value: Option<UnionValue>,
}

impl Union {
    /// An empty union of the given type.
    #[inline]
    pub const fn new(ty: UnionType) -> Self {
        Self { ty, value: None }
    }

    /// An empty variant union.
    #[inline]
    pub const fn variant() -> Self {
        Self::new(UnionType::Variant)
    }

    #[inline]
    pub const fn union_type(&self) -> &UnionType {
        &self.ty
    }

    #[inline]
    pub const fn is_variant(&self) -> bool {
        self.ty.is_variant()
    }

    #[inline]
    pub const fn get(&self) -> Option<&UnionValue> {
        self.value.as_ref()
    }

    /// Replaces the held value.
    ///
    /// A regular union fails with [`RecordError::NotAMember`] when none of its
    /// members accepts the value.
    pub fn set(&mut self, value: UnionValue) -> Result<(), RecordError> {
        if let UnionType::Regular(members) = &self.ty
            && !members.iter().any(|m| value.fits(m.ty()))
        {
            return Err(RecordError::NotAMember(value.describe()));
        }
        self.value = Some(value);
        Ok(())
    }

    #[inline]
    pub fn take(&mut self) -> Option<UnionValue> {
        self.value.take()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{Union, UnionValue};
    use crate::{FieldDef, FieldType, RecordError, Scalar, ScalarKind, UnionType};

    #[test]
    fn regular_union_checks_members() {
        let mut union = Union::new(UnionType::Regular(vec![FieldDef::new(
            "count",
            FieldType::Scalar(ScalarKind::Int),
        )]));
        assert!(!union.is_variant());
        union.set(UnionValue::Scalar(Scalar::Int(1))).unwrap();

        let err = union.set(UnionValue::Scalar(Scalar::Boolean(true))).unwrap_err();
        assert_eq!(err, RecordError::NotAMember("bool".into()));
        assert_eq!(union.get(), Some(&UnionValue::Scalar(Scalar::Int(1))));
    }

    #[test]
    fn clear_empties_the_union() {
        let mut union = Union::variant();
        union.set(UnionValue::Scalar(Scalar::Boolean(true))).unwrap();
        union.clear();
        assert!(union.get().is_none());
        assert!(union.take().is_none());
    }
}
