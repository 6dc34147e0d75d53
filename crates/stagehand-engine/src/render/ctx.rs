use glam::Mat4;

use crate::scene::DrawCmd;

/// Render target implemented by a backend (or by [`crate::scene::DrawList`]).
pub trait Surface {
    /// Receives one draw command and the model matrix active when it was issued.
    fn submit(&mut self, transform: Mat4, cmd: DrawCmd);
}

/// Traversal-time render context: a matrix stack over a borrowed surface.
///
/// `push_transform` multiplies onto the current top, matching the classic
/// fixed-function matrix stack, so children inherit their ancestors' composed
/// transform. Pushes and pops must balance.
pub struct RenderCtx<'a> {
    surface: &'a mut dyn Surface,
    stack: Vec<Mat4>,
}

impl<'a> RenderCtx<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface, stack: vec![Mat4::IDENTITY] }
    }

    /// Currently active composed transform.
    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Pushes `current * model`.
    #[inline]
    pub fn push_transform(&mut self, model: Mat4) {
        let top = self.transform() * model;
        self.stack.push(top);
    }

    /// Pops the most recent transform. The root identity is never popped.
    #[inline]
    pub fn pop_transform(&mut self) {
        debug_assert!(self.stack.len() > 1, "pop_transform called without matching push_transform");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of transforms pushed above the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Submits `cmd` with the current transform.
    #[inline]
    pub fn draw(&mut self, cmd: DrawCmd) {
        let transform = self.transform();
        self.surface.submit(transform, cmd);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::coords::{Color, Rect};
    use crate::scene::{DrawList, FontId, TextCmd};

    fn text(s: &str) -> DrawCmd {
        DrawCmd::Text(TextCmd {
            font: FontId(0),
            text: s.to_string(),
            color: Color::black(),
            bounds: Rect::from_size(10.0, 10.0),
        })
    }

    #[test]
    fn pushes_compose_and_pops_restore() {
        let mut list = DrawList::new();
        {
            let mut ctx = RenderCtx::new(&mut list);
            ctx.push_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
            ctx.push_transform(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)));
            ctx.draw(text("inner"));
            assert_eq!(ctx.depth(), 2);
            ctx.pop_transform();
            ctx.draw(text("outer"));
            ctx.pop_transform();
            assert_eq!(ctx.depth(), 0);
        }

        let items = list.items();
        assert_eq!(items.len(), 2);
        let origin = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(items[0].transform * origin, Vec4::new(10.0, 5.0, 0.0, 1.0));
        assert_eq!(items[1].transform * origin, Vec4::new(10.0, 0.0, 0.0, 1.0));
    }
}
