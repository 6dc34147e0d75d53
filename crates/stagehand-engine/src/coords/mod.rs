//! Coordinate and geometry types shared by the render layer and the scene graph.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//! - Rotation in radians, clockwise on screen (positive Z in a Y-down frame)

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::{IntRect, Rect};
pub use vec2::Vec2;
