//! `Map.prototype` for Ferrule.
use super::{Builtin, arg};
use crate::collections::Map;
use crate::values::Context;
use crate::{Error, Value};

/// The receiver as a map.
fn this_map<'a>(this: &'a Value, name: &str) -> Result<&'a Map, Error> {
    this.as_map().ok_or_else(|| {
        Error::type_mismatch(alloc::format!(
            "Method Map.prototype.{name} called on incompatible receiver {this}"
        ))
    })
}

// ============================================================================
// Lookup and Update
// ============================================================================

/// `map.get(key)`: the value for `key`, or `undefined`.
fn map_get(_ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "get")?;
    Ok(map.get(&arg(args, 0)).unwrap_or(Value::Undefined))
}

/// `map.set(key, value)`: returns the map for chaining.
fn map_set(_ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "set")?;
    map.set(arg(args, 0), arg(args, 1));
    Ok(this.clone())
}

fn map_has(_ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "has")?;
    Ok(Value::Bool(map.has(&arg(args, 0))))
}

fn map_delete(_ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "delete")?;
    Ok(Value::Bool(map.delete(&arg(args, 0))))
}

fn map_clear(_ctx: &Context<'_>, this: &Value, _args: &[Value]) -> Result<Value, Error> {
    this_map(this, "clear")?.clear();
    Ok(Value::Undefined)
}

// ============================================================================
// Iteration
// ============================================================================

/// `map.forEach(callback, thisArg)`: calls `callback(value, key, map)`.
fn map_for_each(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "forEach")?;
    map.for_each(ctx, &arg(args, 0), &arg(args, 1))?;
    Ok(Value::Undefined)
}

fn map_entries(_ctx: &Context<'_>, this: &Value, _args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "entries")?;
    Ok(Value::MapIterator(map.entries().into_shared()))
}

fn map_keys(_ctx: &Context<'_>, this: &Value, _args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "keys")?;
    Ok(Value::MapIterator(map.keys().into_shared()))
}

fn map_values(_ctx: &Context<'_>, this: &Value, _args: &[Value]) -> Result<Value, Error> {
    let map = this_map(this, "values")?;
    Ok(Value::MapIterator(map.values().into_shared()))
}

pub static MAP_PROTOTYPE: &[Builtin] = &[
    Builtin {
        name: "get",
        qualified_name: "Map.prototype.get",
        length: 1,
        func: map_get,
    },
    Builtin {
        name: "set",
        qualified_name: "Map.prototype.set",
        length: 2,
        func: map_set,
    },
    Builtin {
        name: "has",
        qualified_name: "Map.prototype.has",
        length: 1,
        func: map_has,
    },
    Builtin {
        name: "delete",
        qualified_name: "Map.prototype.delete",
        length: 1,
        func: map_delete,
    },
    Builtin {
        name: "clear",
        qualified_name: "Map.prototype.clear",
        length: 0,
        func: map_clear,
    },
    Builtin {
        name: "forEach",
        qualified_name: "Map.prototype.forEach",
        length: 1,
        func: map_for_each,
    },
    Builtin {
        name: "entries",
        qualified_name: "Map.prototype.entries",
        length: 0,
        func: map_entries,
    },
    Builtin {
        name: "keys",
        qualified_name: "Map.prototype.keys",
        length: 0,
        func: map_keys,
    },
    Builtin {
        name: "values",
        qualified_name: "Map.prototype.values",
        length: 0,
        func: map_values,
    },
];

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;
