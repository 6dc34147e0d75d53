use crate::class::{Arity, NativeMethod};
use crate::error::ScriptResult;
use crate::heap::{Handle, Heap};
use crate::value::Value;

use super::args;

fn inspect(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(Value::Str(heap.inspect(this)))
}

fn class_name(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(Value::from(heap.class_name(this)?))
}

/// `is_a?("ClassName")`
fn is_a(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    Ok(Value::Bool(heap.is_kind_of(this, name)))
}

fn respond_to(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let name = args::string(args, 0)?;
    let class = heap.object(this)?.class();
    Ok(Value::Bool(heap.classes().responds_to(class, name)))
}

const METHODS: &[(&str, Arity, NativeMethod)] = &[
    ("inspect", Arity::exact(0), inspect),
    ("class_name", Arity::exact(0), class_name),
    ("is_a?", Arity::exact(1), is_a),
    ("respond_to?", Arity::exact(1), respond_to),
];

pub(super) fn define(heap: &mut Heap) -> ScriptResult<()> {
    let classes = heap.classes_mut();
    let root = classes.root();
    for (name, arity, func) in METHODS {
        classes.define_method(root, name, *arity, *func);
    }
    classes.alias_method(root, "to_s", "inspect")
}
