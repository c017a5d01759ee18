//! Runtime core for Ferrule: typed array views, an insertion-ordered map
//! with a live iterator, and the builtin methods that drive them.

// Used uniformly for `Rc`, `Vec` and `format!` paths.
extern crate alloc;

pub mod api;
pub mod collections;
pub mod stdlib;
pub mod typed_array;
pub mod values;

pub use api::Error;
pub use values::{Context, Value};
