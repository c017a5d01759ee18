use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use super::map_iterator::{IterationKind, MapIterator};
use crate::values::key::KeyRef;
use crate::values::{Context, MapKey, require_callable};
use crate::{Error, Value};

/// One slot of the entry sequence. Slots are never removed or reordered;
/// deleting an entry turns it into a tombstone.
struct Entry {
    key: Value,
    value: Value,
    live: bool,
}

#[derive(Default)]
struct MapData {
    entries: Vec<Entry>,
    /// Live key -> position in `entries`.
    index: HashMap<MapKey, usize>,
    size: usize,
}

/// What a cursor finds at a sequence position.
pub(crate) enum Slot {
    Live(Value, Value),
    Tombstone,
    End,
}

/// An insertion-ordered key/value map with tombstone deletion.
///
/// Entries keep the position they were inserted at. `delete` leaves an inert
/// slot behind, so cursors walking the sequence (see [`MapIterator`]) are
/// never invalidated by mutation: they skip tombstones and pick up entries
/// appended after them. Keys compare with SameValueZero.
///
/// Tombstones are never compacted, not even by [`Map::clear`], so storage
/// grows with the number of insertions rather than with [`Map::size`]. A map
/// under steady set/delete churn should be replaced periodically.
///
/// `Map` is a cheap handle; clones refer to the same map.
///
/// # Example
///
/// ```
/// use ferrule_core::collections::Map;
/// use ferrule_core::Value;
///
/// let map = Map::new();
/// map.set(Value::string("a"), Value::from(1));
/// map.set(Value::string("b"), Value::from(2));
/// map.delete(&Value::string("a"));
///
/// let keys: Vec<Value> = map.keys().collect();
/// assert_eq!(keys, vec![Value::string("b")]);
/// ```
#[derive(Clone, Default)]
pub struct Map {
    data: Rc<RefCell<MapData>>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from an iterable of `[key, value]` arrays, applying
    /// `set` in iteration order.
    ///
    /// Slot 0 is the key and slot 1 the value; missing slots read as
    /// `undefined`. Any element that is not an array is a
    /// [`Error::TypeMismatch`].
    pub fn from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let map = Map::new();
        for entry in entries {
            let Some(pair) = entry.as_array() else {
                return Err(Error::type_mismatch(format!(
                    "Iterator value {entry} is not an entry object"
                )));
            };
            let key = pair.first().cloned().unwrap_or(Value::Undefined);
            let value = pair.get(1).cloned().unwrap_or(Value::Undefined);
            map.set(key, value);
        }
        Ok(map)
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.data.borrow().size
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        let data = self.data.borrow();
        let position = *data.index.get(&KeyRef(key))?;
        Some(data.entries[position].value.clone())
    }

    pub fn has(&self, key: &Value) -> bool {
        self.data.borrow().index.contains_key(&KeyRef(key))
    }

    /// Update the value of a live key in place, or append a new entry.
    pub fn set(&self, key: Value, value: Value) {
        let mut data = self.data.borrow_mut();
        let data = &mut *data;
        if let Some(&position) = data.index.get(&KeyRef(&key)) {
            data.entries[position].value = value;
            return;
        }
        let key = MapKey::new(key);
        let position = data.entries.len();
        data.entries.push(Entry {
            key: key.value().clone(),
            value,
            live: true,
        });
        data.index.insert(key, position);
        data.size += 1;
    }

    /// Tombstone the entry for `key`. Returns whether an entry was removed.
    pub fn delete(&self, key: &Value) -> bool {
        let mut data = self.data.borrow_mut();
        let Some(position) = data.index.remove(&KeyRef(key)) else {
            return false;
        };
        let entry = &mut data.entries[position];
        entry.live = false;
        entry.key = Value::Undefined;
        entry.value = Value::Undefined;
        data.size -= 1;
        tracing::trace!(position, size = data.size, "Map entry tombstoned");
        true
    }

    /// Tombstone every live entry.
    ///
    /// Open iterators keep their cursor and will visit entries added after
    /// the clear.
    pub fn clear(&self) {
        let mut data = self.data.borrow_mut();
        for entry in data.entries.iter_mut().filter(|e| e.live) {
            entry.live = false;
            entry.key = Value::Undefined;
            entry.value = Value::Undefined;
        }
        data.index.clear();
        data.size = 0;
    }

    pub fn entries(&self) -> MapIterator {
        MapIterator::new(self.clone(), IterationKind::Entries)
    }

    pub fn keys(&self) -> MapIterator {
        MapIterator::new(self.clone(), IterationKind::Keys)
    }

    pub fn values(&self) -> MapIterator {
        MapIterator::new(self.clone(), IterationKind::Values)
    }

    /// Call `callback(value, key, map)` with `this_arg` as receiver for each
    /// live entry, in insertion order.
    ///
    /// The walk follows the live sequence like an iterator: entries added
    /// by the callback are visited, entries it deletes before they are
    /// reached are skipped. An error from the callback aborts the walk.
    pub fn for_each(
        &self,
        ctx: &Context<'_>,
        callback: &Value,
        this_arg: &Value,
    ) -> Result<(), Error> {
        let callee = require_callable(callback)?;
        let receiver = Value::Map(self.clone());
        let mut cursor = 0;
        loop {
            match self.slot(cursor) {
                Slot::Live(key, value) => {
                    callee.call(ctx, this_arg, &[value, key, receiver.clone()])?;
                }
                Slot::Tombstone => {}
                Slot::End => return Ok(()),
            }
            cursor += 1;
        }
    }

    /// The slot at `position` of the entry sequence. Clones out of the
    /// borrow so callers may run arbitrary code before the next lookup.
    pub(crate) fn slot(&self, position: usize) -> Slot {
        let data = self.data.borrow();
        match data.entries.get(position) {
            Some(entry) if entry.live => Slot::Live(entry.key.clone(), entry.value.clone()),
            Some(_) => Slot::Tombstone,
            None => Slot::End,
        }
    }

    pub fn ptr_eq(&self, other: &Map) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.data) as usize
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let map = Map::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_map()
            .entries(
                data.entries
                    .iter()
                    .filter(|e| e.live)
                    .map(|e| (&e.key, &e.value)),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "ordered_map_test.rs"]
mod ordered_map_test;
