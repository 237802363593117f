use crate::Reflect;

// -----------------------------------------------------------------------------
// Object

/// Named field access on a struct, the replacement for getter/setter lookup.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect)
/// for structs with named fields. Field names are the reflected names,
/// i.e. after `#[reflect(rename = "...")]`, and skipped fields are invisible.
///
/// # Examples
///
/// ```
/// use recast_reflect::{Reflect, derive::Reflect, ops::Object};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Account {
///     owner: String,
///     balance: i64,
/// }
///
/// let mut account = Account::default();
/// account.set_field("balance", Box::new(12_i64)).unwrap();
/// assert_eq!(account.balance, 12);
///
/// // Wrong type: the value is handed back.
/// let rejected = account.set_field("owner", Box::new(1_i32)).unwrap_err();
/// assert!(rejected.is::<i32>());
///
/// let object: &dyn Object = &account;
/// let names: Vec<_> = object.iter_fields().map(|(name, _)| name).collect();
/// assert_eq!(names, ["owner", "balance"]);
/// ```
pub trait Object: Reflect {
    /// Returns the field called `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field at `index`, in declaration order.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;

    /// Replaces the field called `name`.
    ///
    /// The value is converted with [`FromReflect::take_reflect`] for the
    /// field's type; if there is no such field or the conversion fails, the
    /// value is returned unchanged.
    ///
    /// [`FromReflect::take_reflect`]: crate::FromReflect::take_reflect
    fn set_field(&mut self, name: &str, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn Object {
    /// Iterates over `(name, value)` pairs in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> FieldIter<'_> {
        FieldIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// FieldIter

/// An iterator over the fields of an [`Object`].
pub struct FieldIter<'a> {
    object: &'a dyn Object,
    index: usize,
}

impl<'a> FieldIter<'a> {
    #[inline(always)]
    pub const fn new(object: &'a dyn Object) -> Self {
        Self { object, index: 0 }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.object.name_at(self.index)?;
        let value = self.object.field_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.object.field_len().saturating_sub(self.index);
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for FieldIter<'_> {}
