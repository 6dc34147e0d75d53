use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once before the first frame.
    fn on_start(&mut self) -> AppControl {
        AppControl::Continue
    }

    /// Called once per frame with the input gathered since the previous frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called when the loop is about to terminate.
    fn on_exit(&mut self) {}
}
