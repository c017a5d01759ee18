//! Ferrule - runtime building blocks for a JavaScript-style engine
//!
//! # Overview
//!
//! Ferrule provides the parts of a script runtime that have to get
//! iteration and numeric semantics exactly right:
//!
//! - Typed array views over shared, detachable byte buffers, for all ten
//!   element kinds (`Uint8Array` through `BigInt64Array`)
//! - Short-circuiting traversals (`some`, `every`, `find`, ...) written once
//!   and shared by every kind
//! - An insertion-ordered `Map` whose iterators survive mutation
//!
//! # Quick Start
//!
//! ```
//! use ferrule::{Realm, RealmOptions, Value};
//! use ferrule::typed_array::{ElementKind, TypedArray};
//!
//! let realm = Realm::new(RealmOptions::default());
//! let view = TypedArray::from_values(
//!     ElementKind::BigUint64,
//!     [Value::bigint(2), Value::bigint(4), Value::bigint(6)],
//! )
//! .unwrap();
//!
//! let below_two = Value::native_fn("belowTwo", 1, |_ctx, _this, args| {
//!     let element = args[0].as_bigint().unwrap();
//!     Ok(Value::Bool(*element < ferrule::BigInt::from(2)))
//! });
//! let result = realm.invoke(&Value::from(view), "some", &[below_two]).unwrap();
//! assert_eq!(result, Value::Bool(false));
//! ```
//!
//! # Maps and Iterators
//!
//! ```
//! use ferrule::{Realm, Value};
//! use ferrule::collections::Map;
//!
//! let realm = Realm::default();
//! let map = Map::new();
//! map.set(Value::string("a"), Value::from(0));
//!
//! let iter = realm.invoke(&Value::from(map.clone()), "keys", &[]).unwrap();
//! let iter = iter.as_map_iterator().unwrap();
//! map.set(Value::string("b"), Value::from(1));
//!
//! assert_eq!(iter.next().value, Value::string("a"));
//! assert_eq!(iter.next().value, Value::string("b"));
//! assert!(iter.next().done);
//! ```

// Re-export public API from ferrule_core
pub use ferrule_core::api::{
    Error, OutOfBoundsPolicy, Realm, RealmOptions, RealmOptionsOverride,
};

// Re-export containers, values and builtins
pub use ferrule_core::collections;
pub use ferrule_core::stdlib::{self, Builtin};
pub use ferrule_core::typed_array;
pub use ferrule_core::values::{self, Context, Function, NativeFn, NativeFunction, Value};

// Big integer type carried by `Value::BigInt`
pub use num_bigint::BigInt;
