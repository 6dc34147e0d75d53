//! Recorded draw stream.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands with their model matrices
//! - preserve submission order, which is the scene graph's paint order
//! - keep command payloads isolated per file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use shapes::text::{FontId, TextCmd};
pub use shapes::texture::{TextureCmd, TextureId};
