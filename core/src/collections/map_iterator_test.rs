use super::*;
use pretty_assertions::assert_eq;

fn s(text: &str) -> Value {
    Value::string(text)
}

fn abc() -> Map {
    [
        (s("a"), Value::from(0)),
        (s("b"), Value::from(1)),
        (s("c"), Value::from(2)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_entries_yield_pairs_then_done() {
    let mut iter = abc().entries();
    assert_eq!(iter.kind(), IterationKind::Entries);

    for (key, value) in [("a", 0), ("b", 1), ("c", 2)] {
        let result = iter.next_result();
        assert!(!result.done);
        assert_eq!(result.value, Value::array([s(key), Value::from(value)]));
    }
    assert_eq!(iter.next_result(), IteratorResult::done());
    assert!(iter.is_completed());
}

#[test]
fn test_keys_and_values() {
    let map = abc();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec![s("a"), s("b"), s("c")]);
    assert_eq!(
        map.values().collect::<Vec<_>>(),
        vec![Value::from(0), Value::from(1), Value::from(2)]
    );
}

#[test]
fn test_empty_map_is_done_immediately() {
    let mut iter = Map::new().values();
    assert_eq!(iter.next_result(), IteratorResult::done());
    assert_eq!(iter.next_result(), IteratorResult::done());
}

#[test]
fn test_done_is_terminal() {
    let map = abc();
    let mut iter = map.keys();
    while !iter.next_result().done {}

    // Growing the map does not revive a completed iterator
    map.set(s("d"), Value::from(3));
    for _ in 0..3 {
        assert_eq!(iter.next_result(), IteratorResult::done());
    }
    assert_eq!(iter.next(), None);
}

#[test]
fn test_visits_entries_appended_during_iteration() {
    let map = abc();
    let mut iter = map.keys();
    assert_eq!(iter.next_result().value, s("a"));

    map.set(s("d"), Value::from(3));
    assert_eq!(iter.collect::<Vec<_>>(), vec![s("b"), s("c"), s("d")]);
}

#[test]
fn test_skips_entries_deleted_before_they_are_reached() {
    let map = abc();
    let mut iter = map.keys();
    assert_eq!(iter.next_result().value, s("a"));

    map.delete(&s("b"));
    assert_eq!(iter.collect::<Vec<_>>(), vec![s("c")]);
}

#[test]
fn test_deleting_a_yielded_key_does_not_disturb_the_cursor() {
    let map = abc();
    let mut iter = map.keys();
    assert_eq!(iter.next_result().value, s("a"));
    assert_eq!(iter.next_result().value, s("b"));

    map.delete(&s("a"));
    assert_eq!(iter.collect::<Vec<_>>(), vec![s("c")]);
}

#[test]
fn test_readded_key_is_visited_in_its_new_slot() {
    let map = abc();
    let mut iter = map.keys();
    assert_eq!(iter.next_result().value, s("a"));

    map.delete(&s("a"));
    map.set(s("a"), Value::from(9));
    assert_eq!(iter.collect::<Vec<_>>(), vec![s("b"), s("c"), s("a")]);
}

#[test]
fn test_clear_then_refill_during_iteration() {
    let map = abc();
    let mut iter = map.values();
    assert_eq!(iter.next_result().value, Value::from(0));

    map.clear();
    map.set(s("z"), Value::from(26));
    assert_eq!(iter.collect::<Vec<_>>(), vec![Value::from(26)]);
}

#[test]
fn test_updating_a_pending_entry_is_observed() {
    let map = abc();
    let mut iter = map.values();
    assert_eq!(iter.next_result().value, Value::from(0));

    map.set(s("c"), Value::from(20));
    assert_eq!(
        iter.collect::<Vec<_>>(),
        vec![Value::from(1), Value::from(20)]
    );
}

#[test]
fn test_shared_iterator() {
    let map = abc();
    let shared = map.keys().into_shared();
    let alias = shared.clone();

    assert_eq!(shared.kind(), IterationKind::Keys);
    assert_eq!(shared.next(), IteratorResult::yielded(s("a")));
    // Both handles advance the same cursor
    assert_eq!(alias.next(), IteratorResult::yielded(s("b")));
    assert_eq!(shared.next(), IteratorResult::yielded(s("c")));
    assert!(!alias.is_completed());
    assert_eq!(alias.next(), IteratorResult::done());
    assert!(shared.is_completed());

    assert!(shared.ptr_eq(&alias));
    assert!(!shared.ptr_eq(&SharedMapIterator::from(map.keys())));
}

#[test]
fn test_debug() {
    let map = abc();
    let mut iter = map.entries();
    iter.next_result();
    assert_eq!(
        format!("{iter:?}"),
        "MapIterator { kind: Entries, cursor: 1 }"
    );
    iter.by_ref().for_each(drop);
    assert_eq!(
        format!("{iter:?}"),
        "MapIterator { kind: Entries, completed: true }"
    );
}
