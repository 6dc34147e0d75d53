use std::any::Any;

use stagehand_engine::coords::{Color, Rect};
use stagehand_engine::render::RenderCtx;
use stagehand_engine::scene::{DrawCmd, FontId, TextCmd};

use super::Drawable;

/// A run of text laid out by the backend inside the sprite's box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub font: FontId,
    pub text: String,
    pub color: Color,
}

impl TextField {
    pub fn new(font: FontId, text: impl Into<String>) -> Self {
        Self {
            font,
            text: text.into(),
            color: Color::black(),
        }
    }
}

impl Drawable for TextField {
    fn draw(&self, ctx: &mut RenderCtx<'_>, bounds: Rect) {
        if self.text.is_empty() {
            return;
        }
        ctx.draw(DrawCmd::Text(TextCmd {
            font: self.font,
            text: self.text.clone(),
            color: self.color,
            bounds,
        }));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
