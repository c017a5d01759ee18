use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::iter::FusedIterator;

use super::ordered_map::{Map, Slot};
use crate::Value;

/// What a [`MapIterator`] yields for each live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationKind {
    Keys,
    Values,
    /// `[key, value]` pairs.
    Entries,
}

impl IterationKind {
    fn project(self, key: Value, value: Value) -> Value {
        match self {
            IterationKind::Keys => key,
            IterationKind::Values => value,
            IterationKind::Entries => Value::array([key, value]),
        }
    }
}

/// The `{ value, done }` record produced by each step of an iterator.
#[derive(Debug, Clone, PartialEq)]
pub struct IteratorResult {
    pub value: Value,
    pub done: bool,
}

impl IteratorResult {
    pub fn yielded(value: Value) -> Self {
        Self { value, done: false }
    }

    /// The terminal record, `{ value: undefined, done: true }`.
    pub fn done() -> Self {
        Self {
            value: Value::Undefined,
            done: true,
        }
    }
}

enum State {
    Active { map: Map, cursor: usize },
    Completed,
}

/// A resumable cursor over a [`Map`].
///
/// The iterator walks the map's live entry sequence rather than a snapshot:
/// entries appended before the cursor reaches them are visited, entries
/// deleted before then are skipped, and entries already yielded are never
/// revisited (a deleted and re-added key lands in a new, later slot).
///
/// Once the end of the sequence is reached the iterator completes for good
/// and releases its reference to the map; every later step reports
/// `{ value: undefined, done: true }` even if the map grows again.
pub struct MapIterator {
    kind: IterationKind,
    state: State,
}

impl MapIterator {
    pub(crate) fn new(map: Map, kind: IterationKind) -> Self {
        Self {
            kind,
            state: State::Active { map, cursor: 0 },
        }
    }

    pub fn kind(&self) -> IterationKind {
        self.kind
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, State::Completed)
    }

    /// Advance to the next live entry.
    pub fn next_result(&mut self) -> IteratorResult {
        let State::Active { map, cursor } = &mut self.state else {
            return IteratorResult::done();
        };
        loop {
            match map.slot(*cursor) {
                Slot::Live(key, value) => {
                    *cursor += 1;
                    return IteratorResult::yielded(self.kind.project(key, value));
                }
                Slot::Tombstone => *cursor += 1,
                Slot::End => break,
            }
        }
        tracing::trace!(kind = ?self.kind, position = *cursor, "Map iterator completed");
        self.state = State::Completed;
        IteratorResult::done()
    }

    /// Share this iterator so it can be handed to script code as a value.
    pub fn into_shared(self) -> SharedMapIterator {
        SharedMapIterator(Rc::new(RefCell::new(self)))
    }
}

impl Iterator for MapIterator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let result = self.next_result();
        (!result.done).then_some(result.value)
    }
}

impl FusedIterator for MapIterator {}

impl fmt::Debug for MapIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MapIterator");
        s.field("kind", &self.kind);
        match &self.state {
            State::Active { cursor, .. } => s.field("cursor", cursor),
            State::Completed => s.field("completed", &true),
        };
        s.finish()
    }
}

/// A reference-counted [`MapIterator`], the form held by
/// [`Value::MapIterator`].
#[derive(Clone)]
pub struct SharedMapIterator(Rc<RefCell<MapIterator>>);

impl SharedMapIterator {
    /// One step of the iterator protocol.
    pub fn next(&self) -> IteratorResult {
        self.0.borrow_mut().next_result()
    }

    pub fn kind(&self) -> IterationKind {
        self.0.borrow().kind()
    }

    pub fn is_completed(&self) -> bool {
        self.0.borrow().is_completed()
    }

    pub fn ptr_eq(&self, other: &SharedMapIterator) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl From<MapIterator> for SharedMapIterator {
    fn from(iter: MapIterator) -> Self {
        iter.into_shared()
    }
}

#[cfg(test)]
#[path = "map_iterator_test.rs"]
mod map_iterator_test;
