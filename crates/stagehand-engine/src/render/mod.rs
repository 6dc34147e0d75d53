//! Render capability consumed by the scene graph.
//!
//! The engine does not rasterize anything. A backend implements [`Surface`]
//! and receives draw commands already paired with their composed model
//! matrix; [`RenderCtx`] maintains the matrix stack during a traversal.
//!
//! Convention:
//! - model matrices map node-local logical pixels to root logical pixels
//! - Y grows downward, rotation is about +Z

mod ctx;

pub use ctx::{RenderCtx, Surface};
