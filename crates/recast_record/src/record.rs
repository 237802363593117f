use core::fmt::Display;

use crate::{FieldDef, FieldType, RecordError, Scalar, ScalarArray, ScalarSlice, Shape, Union};

/// The maximum number of elements moved by one chunked get/put call.
pub const CHUNK_LEN: usize = 256;

// -----------------------------------------------------------------------------
// FieldValue

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Scalar(Scalar),
    ScalarArray(ScalarArray),
    Record(Record),
    RecordArray(Vec<Record>),
    Union(Union),
    UnionArray(Vec<Union>),
}

impl FieldValue {
    fn default_for(ty: &FieldType) -> Self {
        match ty {
            FieldType::Scalar(kind) => Self::Scalar(Scalar::default_of(*kind)),
            FieldType::ScalarArray(kind) => Self::ScalarArray(ScalarArray::empty(*kind)),
            FieldType::Record(shape) => Self::Record(Record::new(shape)),
            FieldType::RecordArray(_) => Self::RecordArray(Vec::new()),
            FieldType::Union(ty) => Self::Union(Union::new(ty.clone())),
            FieldType::UnionArray(_) => Self::UnionArray(Vec::new()),
        }
    }
}

// -----------------------------------------------------------------------------
// ArrayChunk

/// One window of a scalar array, as returned by [`Record::get_array`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayChunk<'a> {
    offset: usize,
    data: ScalarSlice<'a>,
}

impl<'a> ArrayChunk<'a> {
    /// Position of the first element of this window in the whole array.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn data(&self) -> ScalarSlice<'a> {
        self.data
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Record

/// A mutable instance of a [`Shape`].
///
/// Every field starts with its default value: zero, `false`, an empty string,
/// empty arrays, a default child record or an empty union.
///
/// # Chunked arrays
///
/// Array fields move at most [`CHUNK_LEN`] elements per call. Readers loop
/// until they have seen [`array_len`](Record::array_len) elements and writers
/// loop until their whole input is accepted.
///
/// ```
/// use recast_record::{CHUNK_LEN, Record, ScalarKind, ScalarSlice, Shape};
///
/// let mut builder = Shape::builder();
/// builder.add_scalar_array("samples", ScalarKind::Long).unwrap();
/// let mut record = Record::new(&builder.build());
///
/// let input: Vec<i64> = (0..600).collect();
/// let mut offset = 0;
/// while offset < input.len() {
///     offset += record.put_array("samples", offset, ScalarSlice::Long(&input[offset..])).unwrap();
/// }
///
/// let first = record.get_array("samples", 0, usize::MAX).unwrap();
/// assert_eq!(first.len(), CHUNK_LEN);
/// assert_eq!(record.array_len("samples").unwrap(), 600);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: Shape,
    values: Vec<FieldValue>,
}

impl Record {
    /// Creates a record of `shape` holding default values.
    pub fn new(shape: &Shape) -> Self {
        Self {
            shape: shape.clone(),
            values: shape
                .fields()
                .iter()
                .map(|def| FieldValue::default_for(def.ty()))
                .collect(),
        }
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The stored type identifier, if any.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.shape.id()
    }

    /// Field declarations in their stored order.
    #[inline]
    pub fn fields(&self) -> &[FieldDef] {
        self.shape.fields()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn slot(&self, name: &str) -> Result<usize, RecordError> {
        self.shape
            .index_of(name)
            .ok_or_else(|| RecordError::NoSuchField(name.to_owned()))
    }

    // -------------------------------------------------------------------------
    // Scalars

    pub fn get_scalar(&self, name: &str) -> Result<&Scalar, RecordError> {
        let index = self.slot(name)?;
        match &self.values[index] {
            FieldValue::Scalar(value) => Ok(value),
            _ => Err(mismatch(&self.shape, index, "scalar")),
        }
    }

    /// Stores a scalar. The value's kind must be the declared kind.
    pub fn put_scalar(&mut self, name: &str, value: Scalar) -> Result<(), RecordError> {
        let index = self.slot(name)?;
        match &mut self.values[index] {
            FieldValue::Scalar(slot) if slot.kind() == value.kind() => {
                *slot = value;
                Ok(())
            }
            _ => Err(mismatch(&self.shape, index, value.kind())),
        }
    }

    // -------------------------------------------------------------------------
    // Child records

    pub fn child(&self, name: &str) -> Result<&Record, RecordError> {
        let index = self.slot(name)?;
        match &self.values[index] {
            FieldValue::Record(child) => Ok(child),
            _ => Err(mismatch(&self.shape, index, "record")),
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Result<&mut Record, RecordError> {
        let index = self.slot(name)?;
        match &mut self.values[index] {
            FieldValue::Record(child) => Ok(child),
            _ => Err(mismatch(&self.shape, index, "record")),
        }
    }

    /// Replaces a child record wholesale.
    ///
    /// The child must have the declared shape.
    pub fn put_child(&mut self, name: &str, child: Record) -> Result<(), RecordError> {
        let index = self.slot(name)?;
        let FieldValue::Record(dst) = &mut self.values[index] else {
            return Err(mismatch(&self.shape, index, "record"));
        };
        if dst.shape != child.shape {
            return Err(mismatch(&self.shape, index, "record of another shape"));
        }
        *dst = child;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Arrays

    /// Length of a scalar, record or union array field.
    pub fn array_len(&self, name: &str) -> Result<usize, RecordError> {
        let index = self.slot(name)?;
        match &self.values[index] {
            FieldValue::ScalarArray(array) => Ok(array.len()),
            FieldValue::RecordArray(records) => Ok(records.len()),
            FieldValue::UnionArray(unions) => Ok(unions.len()),
            _ => Err(mismatch(&self.shape, index, "array")),
        }
    }

    /// Reads up to `count` elements of a scalar array, starting at `offset`.
    ///
    /// The returned window never holds more than [`CHUNK_LEN`] elements and is
    /// empty once `offset` reaches the end of the array.
    pub fn get_array(&self, name: &str, offset: usize, count: usize) -> Result<ArrayChunk<'_>, RecordError> {
        let index = self.slot(name)?;
        let FieldValue::ScalarArray(array) = &self.values[index] else {
            return Err(mismatch(&self.shape, index, "scalar array"));
        };
        let end = window_end(name, array.len(), offset, count)?;
        Ok(ArrayChunk {
            offset,
            data: array.slice(offset, end),
        })
    }

    /// Writes a window of scalars starting at `offset`, growing the array as
    /// needed. Returns how many elements were accepted.
    pub fn put_array(&mut self, name: &str, offset: usize, data: ScalarSlice<'_>) -> Result<usize, RecordError> {
        let index = self.slot(name)?;
        let FieldValue::ScalarArray(array) = &mut self.values[index] else {
            return Err(mismatch(&self.shape, index, format_args!("{} array", data.kind())));
        };
        let data = data.truncate(CHUNK_LEN);
        array.write_at(name, offset, data)?;
        Ok(data.len())
    }

    /// Reads up to `count` child records, starting at `offset`.
    pub fn get_records(&self, name: &str, offset: usize, count: usize) -> Result<&[Record], RecordError> {
        let index = self.slot(name)?;
        let FieldValue::RecordArray(records) = &self.values[index] else {
            return Err(mismatch(&self.shape, index, "record array"));
        };
        let end = window_end(name, records.len(), offset, count)?;
        Ok(&records[offset..end])
    }

    /// Writes child records starting at `offset`. Returns how many were accepted.
    ///
    /// Every record must have the declared element shape.
    pub fn put_records(&mut self, name: &str, offset: usize, records: &[Record]) -> Result<usize, RecordError> {
        let index = self.slot(name)?;
        let declared = match self.shape.fields()[index].ty() {
            FieldType::RecordArray(shape) => shape,
            _ => return Err(mismatch(&self.shape, index, "record array")),
        };
        if records.iter().any(|r| &r.shape != declared) {
            return Err(mismatch(&self.shape, index, "record array of another shape"));
        }
        let FieldValue::RecordArray(dst) = &mut self.values[index] else {
            return Err(mismatch(&self.shape, index, "record array"));
        };
        write_window(name, dst, offset, records)
    }

    // -------------------------------------------------------------------------
    // Unions

    pub fn union(&self, name: &str) -> Result<&Union, RecordError> {
        let index = self.slot(name)?;
        match &self.values[index] {
            FieldValue::Union(union) => Ok(union),
            _ => Err(mismatch(&self.shape, index, "union")),
        }
    }

    pub fn union_mut(&mut self, name: &str) -> Result<&mut Union, RecordError> {
        let index = self.slot(name)?;
        match &mut self.values[index] {
            FieldValue::Union(union) => Ok(union),
            _ => Err(mismatch(&self.shape, index, "union")),
        }
    }

    /// Reads up to `count` unions, starting at `offset`.
    pub fn get_unions(&self, name: &str, offset: usize, count: usize) -> Result<&[Union], RecordError> {
        let index = self.slot(name)?;
        let FieldValue::UnionArray(unions) = &self.values[index] else {
            return Err(mismatch(&self.shape, index, "union array"));
        };
        let end = window_end(name, unions.len(), offset, count)?;
        Ok(&unions[offset..end])
    }

    /// Writes unions starting at `offset`. Returns how many were accepted.
    ///
    /// Every union must have the declared union type.
    pub fn put_unions(&mut self, name: &str, offset: usize, unions: &[Union]) -> Result<usize, RecordError> {
        let index = self.slot(name)?;
        let declared = match self.shape.fields()[index].ty() {
            FieldType::UnionArray(ty) => ty,
            _ => return Err(mismatch(&self.shape, index, "union array")),
        };
        if unions.iter().any(|u| u.union_type() != declared) {
            return Err(mismatch(&self.shape, index, "union array of another union type"));
        }
        let FieldValue::UnionArray(dst) = &mut self.values[index] else {
            return Err(mismatch(&self.shape, index, "union array"));
        };
        write_window(name, dst, offset, unions)
    }
}

#[cold]
fn mismatch(shape: &Shape, index: usize, requested: impl Display) -> RecordError {
    let def = &shape.fields()[index];
    RecordError::KindMismatch {
        field: def.name().to_owned(),
        declared: def.ty().describe(),
        requested: requested.to_string(),
    }
}

fn window_end(field: &str, len: usize, offset: usize, count: usize) -> Result<usize, RecordError> {
    if offset > len {
        return Err(RecordError::OutOfBounds {
            field: field.to_owned(),
            offset,
            len,
        });
    }
    Ok(offset + count.min(CHUNK_LEN).min(len - offset))
}

fn write_window<T: Clone>(field: &str, dst: &mut Vec<T>, offset: usize, src: &[T]) -> Result<usize, RecordError> {
    if offset > dst.len() {
        return Err(RecordError::OutOfBounds {
            field: field.to_owned(),
            offset,
            len: dst.len(),
        });
    }
    let src = &src[..src.len().min(CHUNK_LEN)];
    let overlap = (dst.len() - offset).min(src.len());
    dst[offset..offset + overlap].clone_from_slice(&src[..overlap]);
    dst.extend_from_slice(&src[overlap..]);
    Ok(src.len())
}

#[cfg(test)]
mod tests {
    use super::{CHUNK_LEN, Record};
    use crate::{RecordError, Scalar, ScalarKind, ScalarSlice, Shape, Union, UnionType, UnionValue};

    fn sample() -> Record {
        let mut inner = Shape::builder();
        inner.add_scalar("label", ScalarKind::String).unwrap();
        let inner = inner.build();

        let mut builder = Shape::builder();
        builder.set_id("Sample");
        builder.add_scalar("count", ScalarKind::Int).unwrap();
        builder.add_scalar_array("values", ScalarKind::Double).unwrap();
        builder.add_record("tag", inner.clone()).unwrap();
        builder.add_record_array("tags", inner).unwrap();
        builder.add_union("any", UnionType::Variant).unwrap();
        builder.add_union_array("anys", UnionType::Variant).unwrap();
        Record::new(&builder.build())
    }

    #[test]
    fn new_record_holds_defaults() {
        let record = sample();
        assert_eq!(record.id(), Some("Sample"));
        assert_eq!(record.get_scalar("count").unwrap(), &Scalar::Int(0));
        assert_eq!(record.array_len("values").unwrap(), 0);
        assert_eq!(record.child("tag").unwrap().get_scalar("label").unwrap(), &Scalar::String(String::new()));
        assert!(record.union("any").unwrap().get().is_none());
    }

    #[test]
    fn scalar_kind_is_checked() {
        let mut record = sample();
        let err = record.put_scalar("count", Scalar::Long(1)).unwrap_err();
        assert!(matches!(err, RecordError::KindMismatch { .. }));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(RecordError::NoSuchField(name)) if name == "missing"
        ));
        assert!(record.get_scalar("tag").is_err());
    }

    #[test]
    fn chunked_reads_report_offsets() {
        let mut record = sample();
        let input: Vec<f64> = (0..(CHUNK_LEN * 2 + 5)).map(|i| i as f64).collect();

        let mut offset = 0;
        while offset < input.len() {
            offset += record
                .put_array("values", offset, ScalarSlice::Double(&input[offset..]))
                .unwrap();
        }

        let mut read = Vec::new();
        let mut chunks = 0;
        loop {
            let chunk = record.get_array("values", read.len(), usize::MAX).unwrap();
            if chunk.is_empty() {
                break;
            }
            assert_eq!(chunk.offset(), read.len());
            read.extend(chunk.data().iter());
            chunks += 1;
        }
        assert_eq!(chunks, 3);
        assert_eq!(read.len(), input.len());
        assert_eq!(read[CHUNK_LEN], Scalar::Double(CHUNK_LEN as f64));
    }

    #[test]
    fn record_and_union_windows() {
        let mut record = sample();
        let tag_shape = match record.shape().field("tags").unwrap().ty() {
            crate::FieldType::RecordArray(shape) => shape.clone(),
            _ => unreachable!(),
        };
        let tags = vec![Record::new(&tag_shape); 3];
        assert_eq!(record.put_records("tags", 0, &tags).unwrap(), 3);
        assert_eq!(record.get_records("tags", 1, 10).unwrap().len(), 2);
        assert!(record.put_records("tags", 5, &tags).is_err());

        let mut other = Shape::builder();
        other.add_scalar("label", ScalarKind::String).unwrap();
        other.add_scalar("extra", ScalarKind::Int).unwrap();
        let stranger = Record::new(&other.build());
        let err = record.put_records("tags", 3, &[stranger.clone()]).unwrap_err();
        assert!(matches!(err, RecordError::KindMismatch { .. }));
        assert_eq!(record.array_len("tags").unwrap(), 3);
        assert!(record.put_child("tag", stranger).is_err());
        assert!(record.put_child("tag", tags[0].clone()).is_ok());

        let mut union = Union::variant();
        union.set(UnionValue::Scalar(Scalar::Boolean(true))).unwrap();
        assert_eq!(record.put_unions("anys", 0, &[union.clone()]).unwrap(), 1);
        assert_eq!(record.get_unions("anys", 0, 1).unwrap(), &[union]);

        let regular = Union::new(UnionType::Regular(Vec::new()));
        assert!(record.put_unions("anys", 1, &[regular]).is_err());
    }
}
