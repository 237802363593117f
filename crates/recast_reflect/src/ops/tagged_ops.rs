use crate::Reflect;

/// An enum value: a regular union whose member is fixed by its variant.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) on enums.
/// The marshaller refuses these values, only [`Variant`](crate::ops::Variant)
/// maps to a Record union.
pub trait TaggedUnion: Reflect {
    /// The name of the active variant.
    fn variant_name(&self) -> &str;

    /// The declaration index of the active variant.
    fn variant_index(&self) -> usize;
}
