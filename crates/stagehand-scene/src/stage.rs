use stagehand_engine::input::PlatformEvent;
use stagehand_engine::render::{RenderCtx, Surface};

use crate::dispatcher::DispatchReport;
use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};
use crate::sprite;
use crate::value::Value;

/// Global name under which scripts reach the root node.
pub const GLOBAL: &str = "Stage";

pub const ENTER_FRAME: &str = "enter_frame";

/// The root node of an object space.
///
/// There is one per heap. It is a plain sprite, kept alive by the `Stage`
/// global; this value is the native side's handle to it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Stage {
    handle: Handle,
}

impl Stage {
    /// Creates the root node and publishes it as the `Stage` global.
    pub fn install(heap: &mut Heap) -> ScriptResult<Self> {
        if heap.global(GLOBAL).is_some() {
            return Err(ScriptError::StageAlreadyInstalled);
        }
        let handle = sprite::create(heap)?;
        heap.define_global(GLOBAL, Value::Object(handle));
        log::debug!("stage installed as {}", heap.inspect(handle));
        Ok(Self { handle })
    }

    /// The stage previously installed in `heap`, if any.
    pub fn find(heap: &Heap) -> Option<Self> {
        heap.global(GLOBAL)
            .and_then(Value::as_handle)
            .filter(|h| heap.is_alive(*h))
            .map(|handle| Self { handle })
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn add_child(&self, heap: &mut Heap, child: Handle) -> ScriptResult<()> {
        sprite::add_child(heap, self.handle, child)
    }

    /// Broadcasts `name` to the whole tree.
    pub fn dispatch(&self, heap: &mut Heap, name: &str, args: &[Value]) -> ScriptResult<DispatchReport> {
        sprite::dispatch(heap, self.handle, name, args)
    }

    /// Broadcasts one platform event under its event name.
    pub fn forward(&self, heap: &mut Heap, event: &PlatformEvent) -> ScriptResult<DispatchReport> {
        self.dispatch(heap, event.name(), &event_args(event))
    }

    pub fn enter_frame(&self, heap: &mut Heap, dt: f32) -> ScriptResult<DispatchReport> {
        self.dispatch(heap, ENTER_FRAME, &[Value::Float(dt as f64)])
    }

    pub fn render(&self, heap: &Heap, surface: &mut dyn Surface) -> ScriptResult<()> {
        let mut ctx = RenderCtx::new(surface);
        sprite::render(heap, self.handle, &mut ctx)
    }
}

/// Argument list scripts receive for a platform event.
pub fn event_args(event: &PlatformEvent) -> Vec<Value> {
    match *event {
        PlatformEvent::MouseMove { x, y } => vec![Value::Int(x), Value::Int(y)],
        PlatformEvent::MouseDown { button, x, y } | PlatformEvent::MouseUp { button, x, y } => {
            vec![Value::Int(button.code()), Value::Int(x), Value::Int(y)]
        }
        PlatformEvent::KeyDown { key } | PlatformEvent::KeyUp { key } => {
            vec![Value::from(key.name())]
        }
    }
}
