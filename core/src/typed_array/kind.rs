//! Element kind registry.
//!
//! A static catalog of the ten element representations a typed array can
//! use. Each entry fixes the byte width, the numeric family, and the pair of
//! conversion functions the rest of the runtime goes through:
//!
//! - `coerce`: script value -> stored bits (write time)
//! - `expand`: stored bits -> script value (read time)
//!
//! Integer kinds wrap modulo 2^width (two's complement for signed kinds).
//! Float kinds follow IEEE-754 binary32/binary64. Big-integer kinds store
//! exactly 64 bits and hand arbitrary-precision integers to callbacks. The
//! numeric and big-integer families never convert into each other.

use core::fmt;

use num_bigint::{BigInt, Sign};

use crate::{Error, Value};

/// The element representation of a typed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Uint8,
    Uint16,
    Uint32,
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
    BigUint64,
    BigInt64,
}

/// Stored bits of one element. Only the low `byte_width` bytes are
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawElement(pub u64);

/// Registry entry for one [`ElementKind`].
pub struct ElementCodec {
    pub kind: ElementKind,
    /// Constructor name, e.g. `Uint8Array`.
    pub name: &'static str,
    pub byte_width: usize,
    pub is_bigint: bool,
    pub coerce: fn(&Value) -> Result<RawElement, Error>,
    pub expand: fn(RawElement) -> Value,
}

impl fmt::Debug for ElementCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCodec")
            .field("kind", &self.kind)
            .field("byte_width", &self.byte_width)
            .field("is_bigint", &self.is_bigint)
            .finish()
    }
}

// Indexed by `ElementKind as usize`.
static REGISTRY: [ElementCodec; 10] = [
    ElementCodec {
        kind: ElementKind::Uint8,
        name: "Uint8Array",
        byte_width: 1,
        is_bigint: false,
        coerce: coerce_uint8,
        expand: expand_uint8,
    },
    ElementCodec {
        kind: ElementKind::Uint16,
        name: "Uint16Array",
        byte_width: 2,
        is_bigint: false,
        coerce: coerce_uint16,
        expand: expand_uint16,
    },
    ElementCodec {
        kind: ElementKind::Uint32,
        name: "Uint32Array",
        byte_width: 4,
        is_bigint: false,
        coerce: coerce_uint32,
        expand: expand_uint32,
    },
    ElementCodec {
        kind: ElementKind::Int8,
        name: "Int8Array",
        byte_width: 1,
        is_bigint: false,
        coerce: coerce_int8,
        expand: expand_int8,
    },
    ElementCodec {
        kind: ElementKind::Int16,
        name: "Int16Array",
        byte_width: 2,
        is_bigint: false,
        coerce: coerce_int16,
        expand: expand_int16,
    },
    ElementCodec {
        kind: ElementKind::Int32,
        name: "Int32Array",
        byte_width: 4,
        is_bigint: false,
        coerce: coerce_int32,
        expand: expand_int32,
    },
    ElementCodec {
        kind: ElementKind::Float32,
        name: "Float32Array",
        byte_width: 4,
        is_bigint: false,
        coerce: coerce_float32,
        expand: expand_float32,
    },
    ElementCodec {
        kind: ElementKind::Float64,
        name: "Float64Array",
        byte_width: 8,
        is_bigint: false,
        coerce: coerce_float64,
        expand: expand_float64,
    },
    ElementCodec {
        kind: ElementKind::BigUint64,
        name: "BigUint64Array",
        byte_width: 8,
        is_bigint: true,
        coerce: coerce_bigint64,
        expand: expand_biguint64,
    },
    ElementCodec {
        kind: ElementKind::BigInt64,
        name: "BigInt64Array",
        byte_width: 8,
        is_bigint: true,
        coerce: coerce_bigint64,
        expand: expand_bigint64,
    },
];

impl ElementKind {
    /// Every kind, in registry order.
    pub const ALL: [ElementKind; 10] = [
        ElementKind::Uint8,
        ElementKind::Uint16,
        ElementKind::Uint32,
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::BigUint64,
        ElementKind::BigInt64,
    ];

    /// The eight kinds that hold native numbers.
    pub const NUMERIC: [ElementKind; 8] = [
        ElementKind::Uint8,
        ElementKind::Uint16,
        ElementKind::Uint32,
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Float32,
        ElementKind::Float64,
    ];

    /// The two kinds that hold big integers.
    pub const BIGINT: [ElementKind; 2] = [ElementKind::BigUint64, ElementKind::BigInt64];

    #[inline]
    pub fn codec(self) -> &'static ElementCodec {
        &REGISTRY[self as usize]
    }

    /// Look a kind up by constructor name (`"Int16Array"`).
    pub fn from_name(name: &str) -> Option<ElementKind> {
        REGISTRY
            .iter()
            .find(|codec| codec.name == name)
            .map(|codec| codec.kind)
    }

    pub fn name(self) -> &'static str {
        self.codec().name
    }

    pub fn byte_width(self) -> usize {
        self.codec().byte_width
    }

    pub fn is_bigint(self) -> bool {
        self.codec().is_bigint
    }

    /// Convert a script value to stored bits.
    pub fn coerce(self, value: &Value) -> Result<RawElement, Error> {
        (self.codec().coerce)(value)
    }

    /// Convert stored bits back to a script value.
    pub fn expand(self, raw: RawElement) -> Value {
        (self.codec().expand)(raw)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Value -> number / big integer
// ============================================================================

/// ToNumber restricted to what a typed array accepts.
fn to_number(value: &Value) -> Result<f64, Error> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::String(s) => Ok(string_to_number(s)),
        Value::BigInt(_) => Err(Error::type_mismatch(
            "Cannot convert a BigInt value to a number",
        )),
        other => Err(Error::type_mismatch(format!(
            "Cannot convert {other} to a number"
        ))),
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some((radix, digits)) = radix_prefix(s) {
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN);
    }
    let well_formed = s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_prefix(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

/// ToBigInt restricted to what a typed array accepts.
fn to_bigint(value: &Value) -> Result<BigInt, Error> {
    match value {
        Value::BigInt(b) => Ok(BigInt::clone(b)),
        Value::Bool(b) => Ok(BigInt::from(u8::from(*b))),
        Value::String(s) => string_to_bigint(s)
            .ok_or_else(|| Error::type_mismatch(format!("Cannot convert {s} to a BigInt"))),
        other => Err(Error::type_mismatch(format!(
            "Cannot convert {other} to a BigInt"
        ))),
    }
}

fn string_to_bigint(s: &str) -> Option<BigInt> {
    let s = s.trim();
    if s.is_empty() {
        return Some(BigInt::from(0));
    }
    if let Some((radix, digits)) = radix_prefix(s) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return BigInt::parse_bytes(digits.as_bytes(), radix);
    }
    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    Some(if negative { -magnitude } else { magnitude })
}

// ============================================================================
// Codecs
// ============================================================================

/// Truncate toward zero and wrap into `[0, 2^bits)`. Non-finite values
/// store 0.
fn wrap_integer(n: f64, bits: u32) -> u64 {
    debug_assert!(bits <= 32);
    if !n.is_finite() {
        return 0;
    }
    let modulus = (1u64 << bits) as f64;
    n.trunc().rem_euclid(modulus) as u64
}

/// The low 64 bits of `value` in two's complement.
fn low_u64(value: &BigInt) -> u64 {
    let (sign, digits) = value.to_u64_digits();
    let low = digits.first().copied().unwrap_or(0);
    if sign == Sign::Minus {
        low.wrapping_neg()
    } else {
        low
    }
}

macro_rules! integer_codec {
    ($coerce:ident, $expand:ident, $ty:ty, $bits:expr) => {
        fn $coerce(value: &Value) -> Result<RawElement, Error> {
            Ok(RawElement(wrap_integer(to_number(value)?, $bits)))
        }

        fn $expand(raw: RawElement) -> Value {
            Value::Number(f64::from(raw.0 as $ty))
        }
    };
}

integer_codec!(coerce_uint8, expand_uint8, u8, 8);
integer_codec!(coerce_uint16, expand_uint16, u16, 16);
integer_codec!(coerce_uint32, expand_uint32, u32, 32);
integer_codec!(coerce_int8, expand_int8, i8, 8);
integer_codec!(coerce_int16, expand_int16, i16, 16);
integer_codec!(coerce_int32, expand_int32, i32, 32);

fn coerce_float32(value: &Value) -> Result<RawElement, Error> {
    let n = to_number(value)? as f32;
    Ok(RawElement(u64::from(n.to_bits())))
}

fn expand_float32(raw: RawElement) -> Value {
    Value::Number(f64::from(f32::from_bits(raw.0 as u32)))
}

fn coerce_float64(value: &Value) -> Result<RawElement, Error> {
    Ok(RawElement(to_number(value)?.to_bits()))
}

fn expand_float64(raw: RawElement) -> Value {
    Value::Number(f64::from_bits(raw.0))
}

fn coerce_bigint64(value: &Value) -> Result<RawElement, Error> {
    Ok(RawElement(low_u64(&to_bigint(value)?)))
}

fn expand_biguint64(raw: RawElement) -> Value {
    Value::bigint(raw.0)
}

fn expand_bigint64(raw: RawElement) -> Value {
    Value::bigint(raw.0 as i64)
}

#[cfg(test)]
#[path = "kind_test.rs"]
mod kind_test;
