pub mod dynamic;
pub mod function;
pub mod key;

pub use dynamic::Value;
pub use function::{Context, Function, NativeFn, NativeFunction, require_callable};
pub use key::MapKey;
