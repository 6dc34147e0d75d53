use crate::input::InputFrame;
use crate::render::Surface;
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub time: FrameTime,
    /// Platform events since the previous frame, in arrival order.
    pub input: &'a InputFrame,
    /// Render target for this frame.
    pub surface: &'a mut dyn Surface,
}
