use crate::Reflect;
use crate::info::{DescFn, TypeDesc};
use crate::ops::{List, Map};

/// Builds a fixed array from its elements, handing them back if any element
/// has the wrong type or the count is wrong.
pub type FromItemsFn = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Vec<Box<dyn Reflect>>>;

// -----------------------------------------------------------------------------
// ArrayDesc

/// Descriptor of a fixed array: `[T; N]` or `Box<[T]>`.
pub struct ArrayDesc {
    elem: DescFn,
    len: Option<usize>,
    from_items: FromItemsFn,
}

impl ArrayDesc {
    /// `len` is `None` when the length is only known at runtime.
    #[inline]
    pub const fn new(elem: DescFn, len: Option<usize>, from_items: FromItemsFn) -> Self {
        Self {
            elem,
            len,
            from_items,
        }
    }

    #[inline]
    pub fn elem(&self) -> &'static TypeDesc {
        (self.elem)()
    }

    /// The static length, `None` for `Box<[T]>`.
    #[inline]
    pub const fn len(&self) -> Option<usize> {
        self.len
    }

    /// Assembles the array from boxed elements of the element type.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Vec<Box<dyn Reflect>>> {
        (self.from_items)(items)
    }
}

// -----------------------------------------------------------------------------
// ListDesc

/// Descriptor of an ordered sequence.
pub struct ListDesc {
    elem: DescFn,
    new: Option<fn() -> Box<dyn List>>,
}

impl ListDesc {
    /// `new` is `None` for sequence types that cannot be created empty.
    #[inline]
    pub const fn new(elem: DescFn, new: Option<fn() -> Box<dyn List>>) -> Self {
        Self { elem, new }
    }

    #[inline]
    pub fn elem(&self) -> &'static TypeDesc {
        (self.elem)()
    }

    /// Creates an empty instance of the described sequence.
    #[inline]
    pub fn new_list(&self) -> Option<Box<dyn List>> {
        self.new.map(|new| new())
    }
}

// -----------------------------------------------------------------------------
// MapDesc

/// Descriptor of a keyed map.
pub struct MapDesc {
    key: DescFn,
    value: DescFn,
    new: Option<fn() -> Box<dyn Map>>,
}

impl MapDesc {
    /// `new` is `None` for map types that cannot be created empty.
    #[inline]
    pub const fn new(key: DescFn, value: DescFn, new: Option<fn() -> Box<dyn Map>>) -> Self {
        Self { key, value, new }
    }

    #[inline]
    pub fn key(&self) -> &'static TypeDesc {
        (self.key)()
    }

    #[inline]
    pub fn value(&self) -> &'static TypeDesc {
        (self.value)()
    }

    /// Creates an empty instance of the described map.
    #[inline]
    pub fn new_map(&self) -> Option<Box<dyn Map>> {
        self.new.map(|new| new())
    }
}
