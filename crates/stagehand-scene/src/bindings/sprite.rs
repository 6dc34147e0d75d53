use stagehand_engine::coords::Vec2;

use crate::class::{Arity, NativeMethod};
use crate::error::ScriptResult;
use crate::heap::{Handle, Heap};
use crate::sprite::{self, Sprite};
use crate::value::Value;

use super::{args, dispatcher};

/// Getter and setter for an `f32` field. Setters return the receiver.
macro_rules! float_field {
    ($get:ident, $set:ident, $field:ident) => {
        fn $get(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
            Ok(Value::from(sprite::node(heap, this)?.$field))
        }

        fn $set(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
            sprite::node_mut(heap, this)?.$field = args::float(args, 0)?;
            Ok(Value::Object(this))
        }
    };
}

/// Same for an `i32` field; floats are truncated.
macro_rules! int_field {
    ($get:ident, $set:ident, $field:ident) => {
        fn $get(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
            Ok(Value::from(sprite::node(heap, this)?.$field))
        }

        fn $set(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
            sprite::node_mut(heap, this)?.$field = args::int32(args, 0)?;
            Ok(Value::Object(this))
        }
    };
}

/// `[a, b]` view over two `f32` fields.
macro_rules! float_pair {
    ($get:ident, $set:ident, $a:ident, $b:ident) => {
        fn $get(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
            let s = sprite::node(heap, this)?;
            Ok(args::float_pair_value(s.$a, s.$b))
        }

        fn $set(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
            let (a, b) = args::float_pair(args, 0)?;
            let s = sprite::node_mut(heap, this)?;
            s.$a = a;
            s.$b = b;
            Ok(Value::Object(this))
        }
    };
}

float_field!(x, set_x, x);
float_field!(y, set_y, y);
float_field!(scale_x, set_scale_x, scale_x);
float_field!(scale_y, set_scale_y, scale_y);
float_field!(anchor_x, set_anchor_x, anchor_x);
float_field!(anchor_y, set_anchor_y, anchor_y);
float_field!(rotation, set_rotation, rotation);
int_field!(width, set_width, width);
int_field!(height, set_height, height);
float_pair!(position, set_position, x, y);
float_pair!(scale, set_scale, scale_x, scale_y);
float_pair!(anchor, set_anchor, anchor_x, anchor_y);

fn initialize(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    sprite::init(heap, this, Sprite::new())?;
    Ok(Value::Nil)
}

fn size(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    let s = sprite::node(heap, this)?;
    Ok(Value::Array(vec![s.width.into(), s.height.into()]))
}

fn set_size(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let (w, h) = args::int_pair(args, 0)?;
    let s = sprite::node_mut(heap, this)?;
    s.width = w;
    s.height = h;
    Ok(Value::Object(this))
}

fn is_visible(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(Value::Bool(sprite::node(heap, this)?.visible))
}

fn set_visible(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    sprite::node_mut(heap, this)?.visible = args::truthy(args, 0)?;
    Ok(Value::Object(this))
}

fn parent(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    Ok(sprite::parent(heap, this)?.map_or(Value::Nil, Value::Object))
}

fn children(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    sprite::node(heap, this)?;
    let items = sprite::children(heap, this).into_iter().map(Value::Object).collect();
    Ok(Value::Array(items))
}

fn add_child(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let child = args::node(heap, args, 0)?;
    sprite::add_child(heap, this, child)?;
    Ok(Value::Object(this))
}

fn remove_child(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let child = args::node(heap, args, 0)?;
    sprite::remove_child(heap, this, child)?;
    Ok(Value::Object(this))
}

fn remove_from_parent(heap: &mut Heap, this: Handle, _: &[Value]) -> ScriptResult<Value> {
    sprite::remove_from_parent(heap, this)?;
    Ok(Value::Object(this))
}

fn contains(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let child = args::node(heap, args, 0)?;
    Ok(Value::Bool(sprite::contains(heap, this, child)?))
}

fn point(args: &[Value]) -> ScriptResult<Vec2> {
    Ok(Vec2::new(args::float(args, 0)?, args::float(args, 1)?))
}

/// `global_to_local(x, y) -> [x, y]`, truncated to integers.
fn global_to_local(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    let (x, y) = sprite::global_to_local(heap, this, point(args)?)?.truncated();
    Ok(Value::Array(vec![Value::Int(x), Value::Int(y)]))
}

fn collide(heap: &mut Heap, this: Handle, args: &[Value]) -> ScriptResult<Value> {
    Ok(Value::Bool(sprite::collide(heap, this, point(args)?)?))
}

const METHODS: &[(&str, Arity, NativeMethod)] = &[
    ("initialize", Arity::exact(0), initialize),
    ("x", Arity::exact(0), x),
    ("x=", Arity::exact(1), set_x),
    ("y", Arity::exact(0), y),
    ("y=", Arity::exact(1), set_y),
    ("position", Arity::exact(0), position),
    ("position=", Arity::exact(1), set_position),
    ("width", Arity::exact(0), width),
    ("width=", Arity::exact(1), set_width),
    ("height", Arity::exact(0), height),
    ("height=", Arity::exact(1), set_height),
    ("size", Arity::exact(0), size),
    ("size=", Arity::exact(1), set_size),
    ("scale_x", Arity::exact(0), scale_x),
    ("scale_x=", Arity::exact(1), set_scale_x),
    ("scale_y", Arity::exact(0), scale_y),
    ("scale_y=", Arity::exact(1), set_scale_y),
    ("scale", Arity::exact(0), scale),
    ("scale=", Arity::exact(1), set_scale),
    ("anchor_x", Arity::exact(0), anchor_x),
    ("anchor_x=", Arity::exact(1), set_anchor_x),
    ("anchor_y", Arity::exact(0), anchor_y),
    ("anchor_y=", Arity::exact(1), set_anchor_y),
    ("anchor", Arity::exact(0), anchor),
    ("anchor=", Arity::exact(1), set_anchor),
    ("rotation", Arity::exact(0), rotation),
    ("rotation=", Arity::exact(1), set_rotation),
    ("visible?", Arity::exact(0), is_visible),
    ("visible=", Arity::exact(1), set_visible),
    ("parent", Arity::exact(0), parent),
    ("children", Arity::exact(0), children),
    ("add_child", Arity::exact(1), add_child),
    ("remove_child", Arity::exact(1), remove_child),
    ("remove_from_parent", Arity::exact(0), remove_from_parent),
    ("contains?", Arity::exact(1), contains),
    ("global_to_local", Arity::exact(2), global_to_local),
    ("collide?", Arity::exact(2), collide),
];

pub(super) fn define(heap: &mut Heap) -> ScriptResult<()> {
    let base = heap.classes().require(dispatcher::CLASS)?;
    let classes = heap.classes_mut();
    let class = classes.define_class(sprite::CLASS, Some(base));
    for (name, arity, func) in METHODS {
        classes.define_method(class, name, *arity, *func);
    }
    classes.alias_method(class, "<<", "add_child")?;
    classes.alias_method(class, ">>", "remove_child")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use crate::heap::Heap;

    fn space() -> Heap {
        let mut heap = Heap::new();
        crate::bindings::define_classes(&mut heap).unwrap();
        heap
    }

    fn pair(a: Value, b: Value) -> Value {
        Value::Array(vec![a, b])
    }

    #[test]
    fn accessors_round_trip_through_calls() {
        let mut heap = space();
        let s = heap.new_instance("Sprite", &[]).unwrap();

        assert_eq!(heap.call(s, "x=", &[Value::Int(5)]).unwrap(), Value::Object(s));
        heap.call(s, "y=", &[Value::Float(2.5)]).unwrap();
        assert_eq!(
            heap.call(s, "position", &[]).unwrap(),
            pair(Value::Float(5.0), Value::Float(2.5))
        );

        heap.call(s, "size=", &[pair(Value::Int(40), Value::Float(30.9))]).unwrap();
        assert_eq!(heap.call(s, "width", &[]).unwrap(), Value::Int(40));
        assert_eq!(heap.call(s, "height", &[]).unwrap(), Value::Int(30));

        heap.call(s, "anchor=", &[pair(Value::Float(0.5), Value::Int(1))]).unwrap();
        assert_eq!(heap.call(s, "anchor_y", &[]).unwrap(), Value::Float(1.0));
        assert_eq!(heap.call(s, "scale", &[]).unwrap(), pair(Value::Float(1.0), Value::Float(1.0)));

        assert_eq!(heap.call(s, "visible?", &[]).unwrap(), Value::Bool(true));
        heap.call(s, "visible=", &[Value::Nil]).unwrap();
        assert_eq!(heap.call(s, "visible?", &[]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn tree_methods_and_aliases() {
        let mut heap = space();
        let a = heap.new_instance("Sprite", &[]).unwrap();
        let b = heap.new_instance("Sprite", &[]).unwrap();

        heap.call(a, "<<", &[Value::Object(b)]).unwrap();
        assert_eq!(heap.call(a, "contains?", &[Value::Object(b)]).unwrap(), Value::Bool(true));
        assert_eq!(heap.call(b, "parent", &[]).unwrap(), Value::Object(a));
        assert_eq!(
            heap.call(a, "children", &[]).unwrap(),
            Value::Array(vec![Value::Object(b)])
        );

        heap.call(a, ">>", &[Value::Object(b)]).unwrap();
        assert_eq!(heap.call(a, "contains?", &[Value::Object(b)]).unwrap(), Value::Bool(false));
        assert_eq!(heap.call(b, "parent", &[]).unwrap(), Value::Nil);
    }

    #[test]
    fn structural_methods_reject_non_nodes() {
        let mut heap = space();
        let a = heap.new_instance("Sprite", &[]).unwrap();
        for method in ["add_child", "remove_child", "contains?"] {
            assert_eq!(
                heap.call(a, method, &[Value::Int(3)]),
                Err(ScriptError::type_mismatch("Sprite", "Integer"))
            );
        }
    }

    #[test]
    fn arity_is_enforced() {
        let mut heap = space();
        let a = heap.new_instance("Sprite", &[]).unwrap();
        assert!(matches!(
            heap.call(a, "remove_from_parent", &[Value::Nil]),
            Err(ScriptError::ArgumentCount { given: 1, .. })
        ));
        assert!(matches!(
            heap.call(a, "collide?", &[Value::Int(1)]),
            Err(ScriptError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn geometry_methods() {
        let mut heap = space();
        let root = heap.new_instance("Sprite", &[]).unwrap();
        let a = heap.new_instance("Sprite", &[]).unwrap();
        heap.call(a, "position=", &[pair(Value::Int(10), Value::Int(20))]).unwrap();
        heap.call(a, "size=", &[pair(Value::Int(50), Value::Int(50))]).unwrap();
        heap.call(root, "add_child", &[Value::Object(a)]).unwrap();

        assert_eq!(
            heap.call(a, "global_to_local", &[Value::Float(30.7), Value::Int(40)]).unwrap(),
            pair(Value::Int(20), Value::Int(20))
        );
        assert_eq!(
            heap.call(a, "collide?", &[Value::Int(30), Value::Int(40)]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            heap.call(a, "collide?", &[Value::Int(200), Value::Int(200)]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn sprites_are_event_dispatchers() {
        let mut heap = space();
        let a = heap.new_instance("Sprite", &[]).unwrap();
        assert!(heap.is_kind_of(a, "EventDispatcher"));
        assert_eq!(
            heap.call(a, "is_a?", &[Value::from("EventDispatcher")]).unwrap(),
            Value::Bool(true)
        );
        assert!(heap.call(a, "inspect", &[]).unwrap().as_str().unwrap().starts_with("#<Sprite:"));
    }
}
