//! Argument coercion for native methods.
//!
//! Arity is checked by `Heap::call` before a method runs; these helpers only
//! check kinds.

use stagehand_engine::coords::{Color, IntRect};

use crate::dispatcher::Listener;
use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};
use crate::sprite;
use crate::value::Value;

fn get(args: &[Value], index: usize) -> ScriptResult<&Value> {
    args.get(index)
        .ok_or_else(|| ScriptError::argument(format!("missing argument #{}", index + 1)))
}

fn mismatch(expected: &str, found: &Value) -> ScriptError {
    ScriptError::type_mismatch(expected, found.kind())
}

/// Integer or float, narrowed to `f32`.
pub fn float(args: &[Value], index: usize) -> ScriptResult<f32> {
    let v = get(args, index)?;
    v.as_float().map(|f| f as f32).ok_or_else(|| mismatch("Float", v))
}

/// Integer, or float truncated toward zero.
pub fn int(args: &[Value], index: usize) -> ScriptResult<i64> {
    let v = get(args, index)?;
    v.as_int().ok_or_else(|| mismatch("Integer", v))
}

pub fn int32(args: &[Value], index: usize) -> ScriptResult<i32> {
    narrow(int(args, index)?)
}

pub fn truthy(args: &[Value], index: usize) -> ScriptResult<bool> {
    Ok(get(args, index)?.truthy())
}

pub fn string(args: &[Value], index: usize) -> ScriptResult<&str> {
    let v = get(args, index)?;
    v.as_str().ok_or_else(|| mismatch("String", v))
}

pub fn listener(args: &[Value], index: usize) -> ScriptResult<Listener> {
    let v = get(args, index)?;
    v.as_proc().cloned().ok_or_else(|| mismatch("Proc", v))
}

/// An array of at least `len` elements.
pub fn array(args: &[Value], index: usize, len: usize) -> ScriptResult<&[Value]> {
    let v = get(args, index)?;
    let items = v.as_array().ok_or_else(|| mismatch("Array", v))?;
    if items.len() < len {
        return Err(ScriptError::argument(format!(
            "expected at least {len} elements, got {}",
            items.len()
        )));
    }
    Ok(items)
}

/// `[a, b]` as floats.
pub fn float_pair(args: &[Value], index: usize) -> ScriptResult<(f32, f32)> {
    let items = array(args, index, 2)?;
    Ok((float(items, 0)?, float(items, 1)?))
}

/// `[a, b]` as integers.
pub fn int_pair(args: &[Value], index: usize) -> ScriptResult<(i32, i32)> {
    let items = array(args, index, 2)?;
    Ok((int32(items, 0)?, int32(items, 1)?))
}

/// `[x, y, w, h]`
pub fn rect(args: &[Value], index: usize) -> ScriptResult<IntRect> {
    let items = array(args, index, 4)?;
    Ok(IntRect::new(
        int32(items, 0)?,
        int32(items, 1)?,
        int32(items, 2)?,
        int32(items, 3)?,
    ))
}

/// `[r, g, b]` or `[r, g, b, a]`, each clamped to `0..=255`.
pub fn color(args: &[Value], index: usize) -> ScriptResult<Color> {
    let items = array(args, index, 3)?;
    let channels = (0..items.len().min(4))
        .map(|i| int(items, i))
        .collect::<ScriptResult<Vec<_>>>()?;
    Color::from_channels(&channels)
        .ok_or_else(|| ScriptError::argument("color needs 3 or 4 channels"))
}

/// A sprite-bearing object.
pub fn node(heap: &Heap, args: &[Value], index: usize) -> ScriptResult<Handle> {
    let v = get(args, index)?;
    let handle = v.as_handle().ok_or_else(|| mismatch(sprite::CLASS, v))?;
    sprite::node(heap, handle)?;
    Ok(handle)
}

pub fn narrow(v: i64) -> ScriptResult<i32> {
    i32::try_from(v).map_err(|_| ScriptError::argument(format!("{v} is out of range")))
}

pub fn rect_value(r: IntRect) -> Value {
    Value::Array(vec![r.x.into(), r.y.into(), r.width.into(), r.height.into()])
}

pub fn color_value(c: Color) -> Value {
    Value::Array(c.to_array().iter().map(|ch| Value::Int(*ch as i64)).collect())
}

pub fn float_pair_value(a: f32, b: f32) -> Value {
    Value::Array(vec![a.into(), b.into()])
}
