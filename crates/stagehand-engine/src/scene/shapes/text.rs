use crate::coords::{Color, Rect};

/// Opaque font handle owned by the render backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub u32);

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub font: FontId,
    pub text: String,
    pub color: Color,
    /// Layout box in node-local logical pixels.
    pub bounds: Rect,
}
