use core::fmt;

use crate::impls::NonGenericTypeDescCell;
use crate::info::{DescKind, ListDesc, TypeDesc, Typed};
use crate::ops::ReflectRef;
use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// List

/// An ordered, growable sequence: `Vec<T>`, `VecDeque<T>` or [`DynamicList`].
pub trait List: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Appends a value, converting it to the element type.
    ///
    /// The value is returned unchanged if it cannot be converted.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn List {
    /// Iterates over the elements in order.
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter {
            list: self,
            index: 0,
        }
    }
}

/// An iterator over the elements of a [`List`].
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.list.len().saturating_sub(self.index);
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}

// -----------------------------------------------------------------------------
// DynamicList

/// A type-erased list holding values of any reflected type.
///
/// This is the default ordered sequence: array fields read without a
/// concrete target type come back as a `DynamicList`.
///
/// # Examples
///
/// ```
/// use recast_reflect::ops::{DynamicList, List};
///
/// let mut dynamic = DynamicList::new();
/// dynamic.extend(1_i32);
/// dynamic.extend(String::from("two"));
///
/// assert_eq!(dynamic.len(), 2);
/// assert!(dynamic.get(1).unwrap().is::<String>());
/// ```
#[derive(Default)]
pub struct DynamicList {
    values: Vec<Box<dyn Reflect>>,
}

impl DynamicList {
    /// Creates an empty `DynamicList`.
    #[inline]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a boxed value.
    #[inline]
    pub fn extend_boxed(&mut self, value: Box<dyn Reflect>) {
        self.values.push(value);
    }

    /// Appends a value.
    #[inline]
    pub fn extend<T: Reflect>(&mut self, value: T) {
        self.extend_boxed(Box::new(value));
    }

    /// Downcasts the element at `index`.
    #[inline]
    pub fn get_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Consumes the list, returning its elements.
    #[inline]
    pub fn into_values(self) -> Vec<Box<dyn Reflect>> {
        self.values
    }
}

impl<T: Reflect> FromIterator<T> for DynamicList {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self {
            values: values.into_iter().map(|v| Box::new(v) as Box<dyn Reflect>).collect(),
        }
    }
}

impl Typed for DynamicList {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::new::<Self>(DescKind::List(ListDesc::new(
                <dyn Reflect as Typed>::type_desc,
                Some(new_dynamic_list),
            )))
        })
    }
}

fn new_dynamic_list() -> Box<dyn List> {
    Box::new(DynamicList::new())
}

impl Reflect for DynamicList {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl FromReflect for DynamicList {}

impl List for DynamicList {
    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.values.get(index).map(|v| &**v)
    }

    #[inline]
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.values.push(value);
        Ok(())
    }
}

impl fmt::Debug for DynamicList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
