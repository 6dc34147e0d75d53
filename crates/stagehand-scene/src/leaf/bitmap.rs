use std::any::Any;

use stagehand_engine::coords::{Color, IntRect, Rect};
use stagehand_engine::render::RenderCtx;
use stagehand_engine::scene::{DrawCmd, TextureCmd, TextureId};

use super::Drawable;

/// A region of a backend texture.
///
/// An empty region stands for the whole texture; the backend resolves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub texture: TextureId,
    pub region: IntRect,
    pub tint: Color,
}

impl Bitmap {
    pub fn new(texture: TextureId, region: IntRect) -> Self {
        Self {
            texture,
            region,
            tint: Color::white(),
        }
    }
}

impl Drawable for Bitmap {
    fn draw(&self, ctx: &mut RenderCtx<'_>, _bounds: Rect) {
        ctx.draw(DrawCmd::Texture(TextureCmd {
            texture: self.texture,
            region: self.region,
            tint: self.tint,
        }));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
