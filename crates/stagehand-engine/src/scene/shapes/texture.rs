use crate::coords::{Color, IntRect};

/// Opaque texture handle owned by the render backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Textured quad payload: `region` of `texture`, drawn at the local origin
/// with the region's size, modulated by `tint`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCmd {
    pub texture: TextureId,
    pub region: IntRect,
    pub tint: Color,
}
