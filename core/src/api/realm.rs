//! The Ferrule runtime realm.

use super::{Error, RealmOptions, RealmOptionsOverride};
use crate::stdlib::{Builtin, MAP_PROTOTYPE, TYPED_ARRAY_PROTOTYPE, lookup};
use crate::typed_array::ElementKind;
use crate::values::{Context, Value, require_callable};

/// Owns the runtime options and dispatches builtin method calls.
///
/// A realm has no mutable state of its own: containers live in the values
/// passed to it, so one realm can drive any number of maps and views.
///
/// # Example
///
/// ```
/// use ferrule_core::api::{Realm, RealmOptions};
/// use ferrule_core::typed_array::{ElementKind, TypedArray};
/// use ferrule_core::Value;
///
/// let realm = Realm::new(RealmOptions::default());
/// let view = TypedArray::from_values(
///     ElementKind::Uint8,
///     [Value::from(2), Value::from(4), Value::from(6)],
/// )
/// .unwrap();
///
/// let is_two = Value::native_fn("isTwo", 1, |_ctx, _this, args| {
///     Ok(Value::Bool(args[0].strict_equals(&Value::from(2))))
/// });
/// let found = realm.invoke(&Value::from(view), "some", &[is_two]).unwrap();
/// assert_eq!(found, Value::Bool(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Realm {
    options: RealmOptions,
}

impl Realm {
    pub fn new(options: RealmOptions) -> Self {
        Self { options }
    }

    /// A realm with `overrides` applied on top of `self`'s options.
    pub fn with_overrides(&self, overrides: &RealmOptionsOverride) -> Self {
        let mut options = self.options.clone();
        options.override_with(overrides);
        Self { options }
    }

    pub fn options(&self) -> &RealmOptions {
        &self.options
    }

    /// Call context for invoking functions directly.
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.options)
    }

    /// The method table every view of `kind` dispatches through. All kinds
    /// share one table.
    pub fn typed_array_prototype(&self, _kind: ElementKind) -> &'static [Builtin] {
        TYPED_ARRAY_PROTOTYPE
    }

    /// The builtin `receiver.name` resolves to, if any.
    pub fn method(&self, receiver: &Value, name: &str) -> Option<&'static Builtin> {
        let table = match receiver {
            Value::TypedArray(view) => self.typed_array_prototype(view.kind()),
            Value::Map(_) => MAP_PROTOTYPE,
            _ => return None,
        };
        lookup(table, name)
    }

    /// `receiver.name(...args)`.
    ///
    /// A name with no builtin behind it fails the way calling a missing
    /// property does, with [`Error::NotCallable`].
    pub fn invoke(&self, receiver: &Value, name: &str, args: &[Value]) -> Result<Value, Error> {
        let Some(builtin) = self.method(receiver, name) else {
            tracing::debug!(%receiver, method = name, "No such method");
            return Err(Error::NotCallable {
                value: alloc::format!("{receiver}.{name}"),
            });
        };
        (builtin.func)(&self.context(), receiver, args)
    }

    /// `callee.call(this, ...args)` for any callable value.
    pub fn call(&self, callee: &Value, this: &Value, args: &[Value]) -> Result<Value, Error> {
        require_callable(callee)?.call(&self.context(), this, args)
    }
}

#[cfg(test)]
#[path = "realm_test.rs"]
mod realm_test;
