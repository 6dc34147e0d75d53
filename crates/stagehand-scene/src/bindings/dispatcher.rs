use crate::class::{Arity, NativeMethod};
use crate::dispatcher;
use crate::error::ScriptResult;
use crate::heap::{Handle, Heap};
use crate::sprite;
use crate::value::Value;

use super::args;

pub const CLASS: &str = "EventDispatcher";

/// `on(name, proc)` returns the proc so it can later be passed to `off`.
fn on(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    let listener = args::listener(args, 1)?;
    dispatcher::on(heap, this, name, listener.clone())?;
    Ok(Value::Proc(listener))
}

fn off(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    let listener = args::listener(args, 1)?;
    Ok(Value::Bool(dispatcher::off(heap, this, name, &listener)?))
}

/// `dispatch(name, *args)`. On a sprite this is the tree broadcast; returns
/// the number of listeners that ran without raising.
fn dispatch(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?.to_string();
    let report = sprite::dispatch(heap, this, &name, &args[1..])?;
    Ok(Value::Int(report.delivered as i64))
}

fn has_listeners(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    Ok(Value::Bool(dispatcher::listener_count(heap, this, name)? > 0))
}

fn listener_count(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    Ok(Value::Int(dispatcher::listener_count(heap, this, name)? as i64))
}

const METHODS: &[(&str, Arity, NativeMethod)] = &[
    ("on", Arity::exact(2), on),
    ("off", Arity::exact(2), off),
    ("dispatch", Arity::at_least(1), dispatch),
    ("has_listeners?", Arity::exact(1), has_listeners),
    ("listener_count", Arity::exact(1), listener_count),
];

pub(super) fn define(heap: &mut Heap) -> ScriptResult<()> {
    let classes = heap.classes_mut();
    let class = classes.define_class(CLASS, None);
    for (name, arity, func) in METHODS {
        classes.define_method(class, name, *arity, *func);
    }
    Ok(())
}
