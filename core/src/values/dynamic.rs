use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::collections::{Map, SharedMapIterator};
use crate::typed_array::TypedArray;
use crate::values::function::{Function, NativeFunction};
use crate::{Context, Error};

/// A dynamically typed runtime value.
///
/// This is what callbacks receive and return. Primitive variants are stored
/// inline; heap variants are reference-counted handles, so cloning a `Value`
/// never deep-copies a container and two clones of a heap value are the same
/// object under [`Value::strict_equals`].
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(Rc<BigInt>),
    String(Rc<str>),
    /// An immutable list, used for `[key, value]` pairs.
    Array(Rc<[Value]>),
    Function(Rc<dyn Function>),
    TypedArray(TypedArray),
    Map(Map),
    MapIterator(SharedMapIterator),
}

// Tag plus a fat pointer.
#[cfg(target_pointer_width = "64")]
static_assertions::assert_eq_size!(Value, [usize; 3]);

impl Value {
    pub fn number(value: impl Into<f64>) -> Self {
        Value::Number(value.into())
    }

    pub fn bigint(value: impl Into<BigInt>) -> Self {
        Value::BigInt(Rc::new(value.into()))
    }

    pub fn string(value: &str) -> Self {
        Value::String(Rc::from(value))
    }

    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(elements.into_iter().collect())
    }

    /// Wrap any [`Function`] implementation.
    pub fn function(function: impl Function + 'static) -> Self {
        Value::Function(Rc::new(function))
    }

    /// Create a native function value from a closure.
    ///
    /// `length` is the declared argument count reported for the function.
    pub fn native_fn<F>(name: &str, length: usize, func: F) -> Self
    where
        F: Fn(&Context<'_>, &Value, &[Value]) -> Result<Value, Error> + 'static,
    {
        Value::function(NativeFunction::new(name, length, func))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Rc<dyn Function>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_typed_array(&self) -> Option<&TypedArray> {
        match self {
            Value::TypedArray(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_iterator(&self) -> Option<&SharedMapIterator> {
        match self {
            Value::MapIterator(iter) => Some(iter),
            _ => None,
        }
    }

    /// Truthiness coercion.
    ///
    /// Falsy values are `undefined`, `null`, `false`, `0`, `-0`, `NaN`,
    /// `0n` and the empty string. Everything else is truthy.
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(*n == 0.0 || n.is_nan()),
            Value::BigInt(b) => !b.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_)
            | Value::Function(_)
            | Value::TypedArray(_)
            | Value::Map(_)
            | Value::MapIterator(_) => true,
        }
    }

    /// Strict equality (`===`).
    ///
    /// Numbers compare by IEEE-754 equality (so `NaN !== NaN` and
    /// `0 === -0`), a number never equals a big integer, and heap values
    /// compare by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            _ => self.same_non_number(other),
        }
    }

    /// SameValueZero, the key equality used by maps.
    ///
    /// Like [`Value::strict_equals`] except that `NaN` equals `NaN`.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            _ => self.same_non_number(other),
        }
    }

    fn same_non_number(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => {
                core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (Value::TypedArray(a), Value::TypedArray(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::MapIterator(a), Value::MapIterator(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Name of the value's type as scripts see it from `typeof`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Array(_) | Value::TypedArray(_) | Value::Map(_) | Value::MapIterator(_) => {
                "object"
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(Rc::new(value))
    }
}

impl From<TypedArray> for Value {
    fn from(value: TypedArray) -> Self {
        Value::TypedArray(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

/// Formats a number the way scripts print it: shortest round-trip digits,
/// `-0` as `0`, and exponent form (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
pub(crate) fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }
    if n.is_infinite() {
        return f.write_str("Infinity");
    }

    // Shortest round-trip digits, e.g. "1.2345e-7"
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent + 1;

    if k <= point && point <= 21 {
        f.write_str(&digits)?;
        (0..point - k).try_for_each(|_| f.write_str("0"))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{int}.{frac}")
    } else if -6 < point && point <= 0 {
        f.write_str("0.")?;
        (0..-point).try_for_each(|_| f.write_str("0"))?;
        f.write_str(&digits)
    } else {
        let (first, rest) = digits.split_at(1);
        f.write_str(first)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "e{sign}{}", exponent.abs())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(f, *n),
            Value::BigInt(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
            Value::Array(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !element.is_nullish() {
                        write!(f, "{element}")?;
                    }
                }
                Ok(())
            }
            Value::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
            Value::TypedArray(view) => write!(f, "[object {}]", view.kind().name()),
            Value::Map(_) => f.write_str("[object Map]"),
            Value::MapIterator(_) => f.write_str("[object Map Iterator]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::BigInt(b) => write!(f, "BigInt({b})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(elements) => f.debug_list().entries(elements.iter()).finish(),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::TypedArray(view) => write!(f, "{view:?}"),
            Value::Map(map) => write!(f, "{map:?}"),
            Value::MapIterator(_) => f.write_str("MapIterator(..)"),
        }
    }
}

/// Structural equality for tests and assertions: primitives compare with
/// SameValueZero, immutable arrays element-wise, other heap values by
/// identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            _ => self.same_value_zero(other),
        }
    }
}

#[cfg(test)]
#[path = "dynamic_test.rs"]
mod dynamic_test;
