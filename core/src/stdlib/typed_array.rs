//! `TypedArray.prototype` for Ferrule.
//!
//! One table serves every element kind; the traversal methods dispatch on
//! the receiver's kind only when they read an element.

use super::Builtin;
use super::traversal;

/// Predicate traversals. Every entry declares `length == 1`: the predicate
/// is required and `thisArg` is optional.
pub static TYPED_ARRAY_PROTOTYPE: &[Builtin] = &[
    Builtin {
        name: "some",
        qualified_name: "TypedArray.prototype.some",
        length: 1,
        func: traversal::some,
    },
    Builtin {
        name: "every",
        qualified_name: "TypedArray.prototype.every",
        length: 1,
        func: traversal::every,
    },
    Builtin {
        name: "find",
        qualified_name: "TypedArray.prototype.find",
        length: 1,
        func: traversal::find,
    },
    Builtin {
        name: "findIndex",
        qualified_name: "TypedArray.prototype.findIndex",
        length: 1,
        func: traversal::find_index,
    },
    Builtin {
        name: "findLast",
        qualified_name: "TypedArray.prototype.findLast",
        length: 1,
        func: traversal::find_last,
    },
    Builtin {
        name: "findLastIndex",
        qualified_name: "TypedArray.prototype.findLastIndex",
        length: 1,
        func: traversal::find_last_index,
    },
    Builtin {
        name: "forEach",
        qualified_name: "TypedArray.prototype.forEach",
        length: 1,
        func: traversal::for_each,
    },
];
