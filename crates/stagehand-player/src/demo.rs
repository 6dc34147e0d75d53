//! Demo scene: a spinning card that counts clicks and hides on Space.

use std::cell::Cell;
use std::rc::Rc;

use stagehand_engine::input::{Key, MouseButton, PlatformEvent};
use stagehand_scene::bindings::{BITMAP, TEXT_FIELD};
use stagehand_scene::prelude::*;

/// Radians per second.
const SPIN: f64 = 1.5;
const CARD_SIZE: i64 = 96;

const TINTS: [[i64; 4]; 2] = [[255, 255, 255, 255], [255, 120, 80, 255]];

#[derive(Debug, Copy, Clone)]
pub struct DemoScene {
    pub label: Handle,
    pub card: Handle,
}

fn pair(a: f32, b: f32) -> Value {
    Value::Array(vec![a.into(), b.into()])
}

fn color(c: [i64; 4]) -> Value {
    Value::Array(c.iter().copied().map(Value::Int).collect())
}

pub fn build(heap: &mut Heap, stage: Stage, (width, height): (f32, f32)) -> ScriptResult<DemoScene> {
    let label = heap.new_instance(TEXT_FIELD, &[Value::Int(0), Value::from("click the card")])?;
    heap.call(label, "position=", &[pair(16.0, 16.0)])?;
    heap.call(label, "size=", &[pair(320.0, 24.0)])?;

    let region = Value::Array(vec![Value::Int(0), Value::Int(0), Value::Int(CARD_SIZE), Value::Int(CARD_SIZE)]);
    let card = heap.new_instance(BITMAP, &[Value::Int(0), region])?;
    heap.call(card, "position=", &[pair(width / 2.0, height / 2.0)])?;
    heap.call(card, "anchor=", &[pair(0.5, 0.5)])?;

    stage.add_child(heap, label)?;
    stage.add_child(heap, card)?;

    dispatcher::on(
        heap,
        card,
        "enter_frame",
        Listener::new(move |heap, args| {
            let dt = args.first().and_then(Value::as_float).unwrap_or(0.0);
            let rotation = heap.call(card, "rotation", &[])?.as_float().unwrap_or(0.0);
            heap.call(card, "rotation=", &[Value::Float(rotation + SPIN * dt)])?;
            Ok(())
        }),
    )?;

    let hits = Rc::new(Cell::new(0u32));
    dispatcher::on(
        heap,
        card,
        "mouse_down",
        Listener::new(move |heap, args| {
            let [_, x, y] = args else {
                return Err(ScriptError::argument("mouse_down expects [button, x, y]"));
            };
            if !heap.call(card, "collide?", &[x.clone(), y.clone()])?.truthy() {
                return Ok(());
            }
            hits.set(hits.get() + 1);
            let n = hits.get();
            heap.call(card, "tint=", &[color(TINTS[n as usize % TINTS.len()])])?;
            heap.call(label, "text=", &[Value::from(format!("hits: {n}"))])?;
            Ok(())
        }),
    )?;

    dispatcher::on(
        heap,
        stage.handle(),
        "key_down",
        Listener::new(move |heap, args| {
            if args.first().and_then(Value::as_str) == Some(Key::Space.name()) {
                let visible = heap.call(card, "visible?", &[])?.truthy();
                heap.call(card, "visible=", &[Value::Bool(!visible)])?;
            }
            Ok(())
        }),
    )?;

    log::debug!("demo scene built: {} live objects", heap.live_objects());
    Ok(DemoScene { label, card })
}

/// Scripted input for headless runs: a click on the card, then Space.
pub fn scripted_input(frame: u64, (width, height): (f32, f32)) -> Option<PlatformEvent> {
    let (x, y) = ((width / 2.0) as i64, (height / 2.0) as i64);
    match frame {
        10 => Some(PlatformEvent::MouseDown { button: MouseButton::Left, x, y }),
        11 => Some(PlatformEvent::MouseUp { button: MouseButton::Left, x, y }),
        20 => Some(PlatformEvent::KeyDown { key: Key::Space }),
        21 => Some(PlatformEvent::KeyUp { key: Key::Space }),
        _ => None,
    }
}
