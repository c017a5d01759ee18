//! Typed arrays: the element kind registry, shared byte buffers, and
//! kind-tagged views over them.

pub mod buffer;
pub mod kind;
pub mod view;

pub use buffer::ArrayBuffer;
pub use kind::{ElementCodec, ElementKind, RawElement};
pub use view::TypedArray;
