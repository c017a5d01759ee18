//! Public API for the Ferrule runtime.
//!
//! A [`Realm`] carries the runtime options and dispatches builtin method
//! calls; every fallible operation reports an [`Error`].
//!
//! # Example
//!
//! ```
//! use ferrule_core::api::{Realm, RealmOptions};
//! use ferrule_core::collections::Map;
//! use ferrule_core::Value;
//!
//! let realm = Realm::new(RealmOptions::default());
//! let map = Value::from(Map::new());
//! realm.invoke(&map, "set", &[Value::string("a"), Value::from(0)]).unwrap();
//!
//! let entries = realm.invoke(&map, "entries", &[]).unwrap();
//! let iter = entries.as_map_iterator().unwrap();
//! assert_eq!(iter.next().value, Value::array([Value::string("a"), Value::from(0)]));
//! assert!(iter.next().done);
//! ```

pub mod error;
pub mod options;
pub mod realm;

pub use error::Error;
pub use options::{OutOfBoundsPolicy, RealmOptions, RealmOptionsOverride};
pub use realm::Realm;
