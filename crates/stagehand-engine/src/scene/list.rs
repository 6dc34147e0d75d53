use glam::Mat4;

use super::DrawCmd;
use crate::render::Surface;

/// A single draw item: model matrix + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub transform: Mat4,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Items are kept in submission order; a pre-order scene traversal therefore
/// yields back-to-front paint order with no sorting pass.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Surface for DrawList {
    #[inline]
    fn submit(&mut self, transform: Mat4, cmd: DrawCmd) {
        self.items.push(DrawItem { transform, cmd });
    }
}
