//! Insertion-ordered collections and their iterators.

pub mod map_iterator;
pub mod ordered_map;

pub use map_iterator::{IterationKind, IteratorResult, MapIterator, SharedMapIterator};
pub use ordered_map::Map;
