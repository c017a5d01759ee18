//! Kind-agnostic traversals over typed array views.
//!
//! Every predicate-driven TypedArray method (`some`, `every`, `find`,
//! `findIndex`, `findLast`, `findLastIndex`, `forEach`) is one walk with a
//! different stopping rule. [`traverse`] owns the shared part:
//!
//! 1. the receiver must be a typed array whose buffer is still attached
//! 2. at least one argument must be supplied ([`Error::Arity`])
//! 3. the first argument must be callable ([`Error::NotCallable`])
//! 4. the length is read once; indices `0..n` are visited in the requested
//!    direction and the predicate is called as
//!    `predicate.call(thisArg, element, index, view)`
//!
//! The element kind only matters inside [`TypedArray::get`], so the walk is
//! identical for all ten kinds.
//!
//! The predicate may detach or shrink the buffer. The length is not
//! re-read; what happens at an index the buffer no longer backs is decided
//! by the realm's [`OutOfBoundsPolicy`].

use core::ops::ControlFlow;

use super::arg;
use crate::api::OutOfBoundsPolicy;
use crate::typed_array::TypedArray;
use crate::values::{Context, require_callable};
use crate::{Error, Value};

/// Visiting order of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `0, 1, ..., n - 1`
    Ascending,
    /// `n - 1, ..., 1, 0`
    Descending,
}

/// What the predicate produced for one index.
#[derive(Debug)]
pub struct Visit {
    pub index: usize,
    pub element: Value,
    pub result: Value,
}

/// Validate the call and walk the receiver.
///
/// `step` sees each [`Visit`] and either continues or breaks with the
/// method's return value. Returns `Continue(())` when every index was
/// visited without a break.
///
/// `name` is the qualified method name reported by [`Error::Arity`].
pub fn traverse<F>(
    ctx: &Context<'_>,
    this: &Value,
    args: &[Value],
    name: &'static str,
    direction: Direction,
    mut step: F,
) -> Result<ControlFlow<Value>, Error>
where
    F: FnMut(Visit) -> ControlFlow<Value>,
{
    let view = this_typed_array(this)?;
    if args.is_empty() {
        return Err(Error::Arity { name });
    }
    let predicate = require_callable(&args[0])?;
    let this_arg = arg(args, 1);
    let receiver = Value::TypedArray(view.clone());

    let length = view.len();
    for position in 0..length {
        let index = match direction {
            Direction::Ascending => position,
            Direction::Descending => length - 1 - position,
        };
        let element = read(ctx, view, index)?;
        let result = predicate.call(
            ctx,
            &this_arg,
            &[element.clone(), Value::Number(index as f64), receiver.clone()],
        )?;
        if let ControlFlow::Break(value) = step(Visit {
            index,
            element,
            result,
        }) {
            tracing::debug!(method = name, index, length, "Traversal short-circuited");
            return Ok(ControlFlow::Break(value));
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// The receiver as a typed array, rejecting non-views and detached views.
fn this_typed_array(this: &Value) -> Result<&TypedArray, Error> {
    let Some(view) = this.as_typed_array() else {
        return Err(Error::type_mismatch(format!("{this} is not a typed array")));
    };
    if view.buffer().is_detached() {
        return Err(Error::Bounds {
            index: 0,
            length: view.len(),
        });
    }
    Ok(view)
}

fn read(ctx: &Context<'_>, view: &TypedArray, index: usize) -> Result<Value, Error> {
    match view.get(index) {
        Err(Error::Bounds { .. }) if ctx.out_of_bounds() == OutOfBoundsPolicy::Undefined => {
            Ok(Value::Undefined)
        }
        other => other,
    }
}

/// Break with `value` when the predicate result is truthy.
fn break_if_truthy(visit: &Visit, value: Value) -> ControlFlow<Value> {
    if visit.result.to_boolean() {
        ControlFlow::Break(value)
    } else {
        ControlFlow::Continue(())
    }
}

// ============================================================================
// Traversal Methods
// ============================================================================

/// `true` as soon as the predicate returns a truthy value, else `false`.
pub fn some(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let flow = traverse(
        ctx,
        this,
        args,
        "TypedArray.prototype.some",
        Direction::Ascending,
        |visit| break_if_truthy(&visit, Value::Bool(true)),
    )?;
    Ok(flow.break_value().unwrap_or(Value::Bool(false)))
}

/// `false` as soon as the predicate returns a falsy value, else `true`.
pub fn every(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    let flow = traverse(
        ctx,
        this,
        args,
        "TypedArray.prototype.every",
        Direction::Ascending,
        |visit| {
            if visit.result.to_boolean() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(Value::Bool(false))
            }
        },
    )?;
    Ok(flow.break_value().unwrap_or(Value::Bool(true)))
}

/// First element whose predicate result is truthy, else `undefined`.
pub fn find(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    find_element(ctx, this, args, "TypedArray.prototype.find", Direction::Ascending)
}

/// Index of the first matching element, else `-1`.
pub fn find_index(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    find_position(
        ctx,
        this,
        args,
        "TypedArray.prototype.findIndex",
        Direction::Ascending,
    )
}

/// Last element whose predicate result is truthy, else `undefined`.
pub fn find_last(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    find_element(
        ctx,
        this,
        args,
        "TypedArray.prototype.findLast",
        Direction::Descending,
    )
}

/// Index of the last matching element, else `-1`.
pub fn find_last_index(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    find_position(
        ctx,
        this,
        args,
        "TypedArray.prototype.findLastIndex",
        Direction::Descending,
    )
}

/// Call the predicate for every index; always `undefined`.
pub fn for_each(ctx: &Context<'_>, this: &Value, args: &[Value]) -> Result<Value, Error> {
    // The step never breaks
    let _flow = traverse(
        ctx,
        this,
        args,
        "TypedArray.prototype.forEach",
        Direction::Ascending,
        |_| ControlFlow::Continue(()),
    )?;
    Ok(Value::Undefined)
}

fn find_element(
    ctx: &Context<'_>,
    this: &Value,
    args: &[Value],
    name: &'static str,
    direction: Direction,
) -> Result<Value, Error> {
    let flow = traverse(ctx, this, args, name, direction, |visit| {
        let element = visit.element.clone();
        break_if_truthy(&visit, element)
    })?;
    Ok(flow.break_value().unwrap_or(Value::Undefined))
}

fn find_position(
    ctx: &Context<'_>,
    this: &Value,
    args: &[Value],
    name: &'static str,
    direction: Direction,
) -> Result<Value, Error> {
    let flow = traverse(ctx, this, args, name, direction, |visit| {
        break_if_truthy(&visit, Value::Number(visit.index as f64))
    })?;
    Ok(flow.break_value().unwrap_or(Value::from(-1)))
}

#[cfg(test)]
#[path = "traversal_test.rs"]
mod traversal_test;
