use crate::Reflect;

// -----------------------------------------------------------------------------
// Array

/// A fixed-length sequence: `[T; N]` or `Box<[T]>`.
///
/// Arrays are never built element by element; deserialization collects the
/// elements first and assembles them through
/// [`ArrayDesc::from_items`](crate::info::ArrayDesc::from_items).
pub trait Array: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;
}

impl dyn Array {
    /// Iterates over the elements in order.
    #[inline]
    pub fn iter(&self) -> ArrayItemIter<'_> {
        ArrayItemIter {
            array: self,
            index: 0,
        }
    }
}

/// An iterator over the elements of an [`Array`].
pub struct ArrayItemIter<'a> {
    array: &'a dyn Array,
    index: usize,
}

impl<'a> Iterator for ArrayItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.array.len().saturating_sub(self.index);
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for ArrayItemIter<'_> {}
