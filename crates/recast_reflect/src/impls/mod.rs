//! Reflection for foreign types, and the cells used to implement [`Typed`].
//!
//! - [`NonGenericTypeDescCell`]: used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeDescCell`]: used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars: `i8`, `i16`, `i32`, `i64`, `f32`, `f64`, `bool`, `char`, `String`
//! - optional: `Option<T>`
//! - arrays: `[T; N]`, `Box<[T]>`
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - maps: `std::collections::HashMap<K, V, S>`, `hashbrown::HashMap<K, V, S>`,
//!   `BTreeMap<K, V>`
//!
//! Unsigned integers have no Record scalar kind and are not reflected.
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod array;
mod list;
mod map;
mod native;
mod option;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeDescCell, NonGenericTypeDescCell};
