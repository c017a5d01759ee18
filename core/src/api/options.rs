//! Runtime configuration.
//!
//! Options follow a defaults-plus-override scheme: a [`Realm`](super::Realm)
//! is created with a full [`RealmOptions`], and callers may tweak individual
//! fields with a [`RealmOptionsOverride`] where every field is optional.

/// What a traversal does when it reaches an index the view's buffer no
/// longer backs (the buffer was detached or shrunk by a callback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    /// Abort with [`Error::Bounds`](super::Error::Bounds) at the first
    /// invalid index.
    #[default]
    Error,

    /// Hand `undefined` to the callback and keep going, the way
    /// ECMAScript engines read a missing integer-indexed element.
    Undefined,
}

/// Options for a [`Realm`](super::Realm).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealmOptions {
    /// Policy for reads past a shrunk or detached buffer during traversal.
    pub out_of_bounds: OutOfBoundsPolicy,
}

/// Partial [`RealmOptions`]; `None` fields keep the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealmOptionsOverride {
    pub out_of_bounds: Option<OutOfBoundsPolicy>,
}

impl RealmOptions {
    /// Apply every field set in `other`.
    pub fn override_with(&mut self, other: &RealmOptionsOverride) {
        if let Some(policy) = other.out_of_bounds {
            self.out_of_bounds = policy;
        }
    }
}
