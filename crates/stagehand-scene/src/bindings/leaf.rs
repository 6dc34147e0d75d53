use stagehand_engine::coords::IntRect;
use stagehand_engine::scene::{FontId, TextureId};

use crate::class::{Arity, NativeMethod};
use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};
use crate::leaf::{Bitmap, Drawable, TextField};
use crate::sprite::{self, Sprite};
use crate::value::Value;

use super::args;

pub const BITMAP: &str = "Bitmap";
pub const TEXT_FIELD: &str = "TextField";

fn content<'h, T: Drawable>(heap: &'h Heap, this: Handle, kind: &str) -> ScriptResult<&'h T> {
    sprite::node(heap, this)?
        .drawable::<T>()
        .ok_or_else(|| ScriptError::MissingNativeObject { expected: kind.to_string() })
}

fn content_mut<'h, T: Drawable>(heap: &'h mut Heap, this: Handle, kind: &str) -> ScriptResult<&'h mut T> {
    sprite::node_mut(heap, this)?
        .drawable_mut::<T>()
        .ok_or_else(|| ScriptError::MissingNativeObject { expected: kind.to_string() })
}

fn id(args: &[Value], index: usize) -> ScriptResult<u32> {
    let raw = args::int(args, index)?;
    u32::try_from(raw).map_err(|_| ScriptError::argument(format!("invalid resource id {raw}")))
}

// ── Bitmap ───────────────────────────────────────────────────────────────

/// `Bitmap.new(texture_id, [x, y, w, h] = nil)`. The node takes the region's
/// size.
fn bitmap_initialize(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let texture = TextureId(id(args, 0)?);
    let region = match args.get(1) {
        None | Some(Value::Nil) => IntRect::default(),
        Some(_) => args::rect(args, 1)?,
    };
    let node = Sprite::with_drawable(Bitmap::new(texture, region), region.width, region.height);
    sprite::init(heap, this, node)?;
    Ok(Value::Nil)
}

fn bitmap_texture(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    let bitmap = content::<Bitmap>(heap, this, BITMAP)?;
    Ok(Value::Int(bitmap.texture.0 as i64))
}

fn bitmap_region(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(args::rect_value(content::<Bitmap>(heap, this, BITMAP)?.region))
}

/// Replaces the region and resizes the node to it.
fn bitmap_set_region(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let region = args::rect(args, 0)?;
    content_mut::<Bitmap>(heap, this, BITMAP)?.region = region;
    let node = sprite::node_mut(heap, this)?;
    node.width = region.width;
    node.height = region.height;
    Ok(Value::Object(this))
}

fn bitmap_tint(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(args::color_value(content::<Bitmap>(heap, this, BITMAP)?.tint))
}

fn bitmap_set_tint(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let tint = args::color(args, 0)?;
    content_mut::<Bitmap>(heap, this, BITMAP)?.tint = tint;
    Ok(Value::Object(this))
}

const BITMAP_METHODS: &[(&str, Arity, NativeMethod)] = &[
    ("initialize", Arity::range(1, 2), bitmap_initialize),
    ("texture", Arity::exact(0), bitmap_texture),
    ("region", Arity::exact(0), bitmap_region),
    ("region=", Arity::exact(1), bitmap_set_region),
    ("tint", Arity::exact(0), bitmap_tint),
    ("tint=", Arity::exact(1), bitmap_set_tint),
];

// ── TextField ────────────────────────────────────────────────────────────

/// `TextField.new(font_id, text)`
fn text_initialize(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let font = FontId(id(args, 0)?);
    let text = args::string(args, 1)?;
    let mut node = Sprite::new();
    node.set_drawable(TextField::new(font, text));
    sprite::init(heap, this, node)?;
    Ok(Value::Nil)
}

fn text_text(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(Value::from(content::<TextField>(heap, this, TEXT_FIELD)?.text.as_str()))
}

fn text_set_text(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let text = args::string(args, 0)?.to_string();
    content_mut::<TextField>(heap, this, TEXT_FIELD)?.text = text;
    Ok(Value::Object(this))
}

fn text_color(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(args::color_value(content::<TextField>(heap, this, TEXT_FIELD)?.color))
}

fn text_set_color(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let color = args::color(args, 0)?;
    content_mut::<TextField>(heap, this, TEXT_FIELD)?.color = color;
    Ok(Value::Object(this))
}

const TEXT_FIELD_METHODS: &[(&str, Arity, NativeMethod)] = &[
    ("initialize", Arity::exact(2), text_initialize),
    ("text", Arity::exact(0), text_text),
    ("text=", Arity::exact(1), text_set_text),
    ("color", Arity::exact(0), text_color),
    ("color=", Arity::exact(1), text_set_color),
];

pub(super) fn define(heap: &mut Heap) -> ScriptResult<()> {
    let base = heap.classes().require(sprite::CLASS)?;
    let classes = heap.classes_mut();
    for (class_name, methods) in [(BITMAP, BITMAP_METHODS), (TEXT_FIELD, TEXT_FIELD_METHODS)] {
        let class = classes.define_class(class_name, Some(base));
        for (name, arity, func) in methods {
            classes.define_method(class, name, *arity, *func);
        }
    }
    Ok(())
}
