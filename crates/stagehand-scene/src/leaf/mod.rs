//! Drawable content owned by a sprite.
//!
//! A sprite draws its own content, if any, after pushing its model matrix and
//! before its children. Content is drawn in node-local space inside the
//! sprite's `[0, width] x [0, height]` box.

use std::any::Any;

use stagehand_engine::coords::Rect;
use stagehand_engine::render::RenderCtx;

pub mod bitmap;
pub mod text_field;

pub use bitmap::Bitmap;
pub use text_field::TextField;

pub trait Drawable: Any {
    fn draw(&self, ctx: &mut RenderCtx<'_>, bounds: Rect);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
