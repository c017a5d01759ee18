//! Hashable map keys with SameValueZero equality.

use alloc::rc::Rc;
use core::hash::{Hash, Hasher};

use hashbrown::Equivalent;

use super::dynamic::Value;

/// A [`Value`] usable as a hash key.
///
/// Equality is [`Value::same_value_zero`]; hashing is consistent with it:
/// every `NaN` hashes alike, `-0` hashes like `+0`, strings and big
/// integers hash by content, and heap values by address.
#[derive(Debug, Clone)]
pub struct MapKey(Value);

impl MapKey {
    /// Wrap a value, normalizing `-0` to `+0` so the stored key prints the
    /// way it compares.
    pub fn new(value: Value) -> Self {
        match value {
            Value::Number(n) if n == 0.0 => MapKey(Value::Number(0.0)),
            other => MapKey(other),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_value_zero(&other.0)
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

/// Borrowed lookup key, so probing a map does not clone the value.
pub(crate) struct KeyRef<'a>(pub &'a Value);

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self.0, state);
    }
}

impl Equivalent<MapKey> for KeyRef<'_> {
    fn equivalent(&self, key: &MapKey) -> bool {
        self.0.same_value_zero(&key.0)
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    core::mem::discriminant(value).hash(state);
    match value {
        Value::Undefined | Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => {
            let bits = if n.is_nan() {
                f64::NAN.to_bits()
            } else if *n == 0.0 {
                0
            } else {
                n.to_bits()
            };
            bits.hash(state);
        }
        Value::BigInt(b) => b.hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(a) => Rc::as_ptr(a).cast::<()>().hash(state),
        Value::Function(f) => Rc::as_ptr(f).cast::<()>().hash(state),
        Value::TypedArray(view) => view.addr().hash(state),
        Value::Map(map) => map.addr().hash(state),
        Value::MapIterator(iter) => iter.addr().hash(state),
    }
}
