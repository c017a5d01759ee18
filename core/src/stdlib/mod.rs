//! Ferrule Standard Library
//!
//! Builtin prototype methods, each described by a static [`Builtin`]:
//! - TypedArray: short-circuiting traversals (`some`, `every`, `find`, ...)
//!   shared by all ten element kinds
//! - Map: the ordered map methods (`get`, `set`, `forEach`, `entries`, ...)
//!
//! Descriptors are grouped into prototype tables. A [`Realm`](crate::api::Realm)
//! picks the table for a receiver and dispatches by name.

use core::fmt;

use crate::values::{Context, Function};
use crate::{Error, Value};

pub mod map;
pub mod traversal;
pub mod typed_array;

pub use map::MAP_PROTOTYPE;
pub use traversal::Direction;
pub use typed_array::TYPED_ARRAY_PROTOTYPE;

/// Native entry point of a builtin: `(ctx, this, args)`.
pub type BuiltinFn = fn(&Context<'_>, &Value, &[Value]) -> Result<Value, Error>;

/// Static descriptor of a builtin method.
///
/// `length` is the declared arity scripts observe; it is data on the
/// descriptor, not derived from the entry point.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Property name, e.g. `some`.
    pub name: &'static str,
    /// Name used in diagnostics, e.g. `TypedArray.prototype.some`.
    pub qualified_name: &'static str,
    pub length: usize,
    pub func: BuiltinFn,
}

impl Builtin {
    /// The builtin as a callable value.
    pub fn to_value(&'static self) -> Value {
        Value::function(*self)
    }
}

impl Function for Builtin {
    fn name(&self) -> &str {
        self.name
    }

    fn length(&self) -> usize {
        self.length
    }

    fn call(&self, ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
        (self.func)(ctx, this, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.qualified_name)
            .field("length", &self.length)
            .finish()
    }
}

/// Find a method by property name in a prototype table.
pub fn lookup(table: &'static [Builtin], name: &str) -> Option<&'static Builtin> {
    table.iter().find(|builtin| builtin.name == name)
}

/// Argument `index`, or `undefined` when fewer were passed.
#[inline]
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}
