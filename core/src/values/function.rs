//! Callable values.
//!
//! Every invocable [`Value`] wraps a [`Function`]. Builtins implement the
//! trait through static descriptors (see [`crate::stdlib::Builtin`]); host
//! code and tests usually reach for [`NativeFunction`], which wraps a
//! closure.

use alloc::boxed::Box;
use alloc::rc::Rc;

use super::dynamic::Value;
use crate::api::{Error, OutOfBoundsPolicy, RealmOptions};

// ============================================================================
// Call Context
// ============================================================================

/// Execution context handed to every function call.
///
/// Bundles the realm-wide resources a function might need. Currently that
/// is only the realm options; builtins consult them for policies such as
/// out-of-bounds reads.
#[derive(Debug, Clone, Copy)]
pub struct Context<'realm> {
    options: &'realm RealmOptions,
}

impl<'realm> Context<'realm> {
    #[inline]
    pub fn new(options: &'realm RealmOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &'realm RealmOptions {
        self.options
    }

    #[inline]
    pub fn out_of_bounds(&self) -> OutOfBoundsPolicy {
        self.options.out_of_bounds
    }
}

// ============================================================================
// Function Trait
// ============================================================================

/// Trait for callable values.
///
/// `call` is synchronous: the callee runs to completion and its result (or
/// error) is consumed immediately by the caller. Callees may re-enter and
/// mutate any container reachable from their arguments.
pub trait Function {
    /// The function's name, used in diagnostics.
    fn name(&self) -> &str;

    /// Declared argument count (what scripts read as `fn.length`).
    fn length(&self) -> usize;

    /// Invoke the function with `this` as receiver.
    fn call(&self, ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error>;
}

/// Signature of closures wrapped by [`NativeFunction`].
pub type NativeFn = dyn Fn(&Context<'_>, &Value, &[Value]) -> Result<Value, Error>;

/// A function backed by a Rust closure.
///
/// # Example
///
/// ```
/// use ferrule_core::values::{NativeFunction, Value};
///
/// let is_two = NativeFunction::new("isTwo", 1, |_ctx, _this, args| {
///     let arg = args.first().cloned().unwrap_or(Value::Undefined);
///     Ok(Value::Bool(arg.strict_equals(&Value::from(2))))
/// });
/// let value = Value::function(is_two);
/// assert!(value.is_callable());
/// ```
pub struct NativeFunction {
    name: Rc<str>,
    length: usize,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: &str, length: usize, func: F) -> Self
    where
        F: Fn(&Context<'_>, &Value, &[Value]) -> Result<Value, Error> + 'static,
    {
        Self {
            name: Rc::from(name),
            length,
            func: Box::new(func),
        }
    }
}

impl Function for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> usize {
        self.length
    }

    fn call(&self, ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
        (self.func)(ctx, this, args)
    }
}

/// Returns the callee if `value` is invocable, otherwise the
/// [`Error::NotCallable`] scripts see (`"<value> is not a function"`).
pub fn require_callable(value: &Value) -> Result<&Rc<dyn Function>, Error> {
    value.as_function().ok_or_else(|| Error::NotCallable {
        value: value.to_string(),
    })
}
