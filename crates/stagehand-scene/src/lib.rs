//! Stagehand scene: a sprite tree living in a garbage-collected script object
//! space, on top of `stagehand-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stagehand_scene::prelude::*;
//!
//! let mut player = Player::new(PlayerConfig::default())?;
//! player.setup(|heap, stage| {
//!     let label = heap.new_instance("TextField", &[Value::Int(0), Value::from("hello")])?;
//!     heap.call(label, "position=", &[Value::Array(vec![Value::Int(20), Value::Int(20)])])?;
//!     stage.add_child(heap, label)?;
//!     dispatcher::on(heap, label, "mouse_down", Listener::new(move |heap, args| {
//!         heap.call(label, "text=", &[Value::from(format!("clicked at {:?}", &args[1..]))])?;
//!         Ok(())
//!     }))
//! })?;
//!
//! // Drive it with the engine's window runtime or headless loop:
//! Headless::new(60, Duration::from_millis(16)).run(&mut player, |_, _| {});
//! ```
//!
//! # Object lifetime
//!
//! Objects live in a [`heap::Heap`] and are reclaimed by [`heap::Heap::collect`]
//! once unreachable from the `Stage` global, a registered handle, or the
//! temporary arena. The [`player::Player`] releases each frame's temporaries
//! and collects after every frame.

pub mod bindings;
pub mod bridge;
pub mod class;
pub mod dispatcher;
pub mod error;
pub mod heap;
pub mod leaf;
pub mod player;
pub mod sprite;
pub mod stage;
pub mod value;

pub use error::{ScriptError, ScriptResult};
pub use player::{FrameReport, Player, PlayerConfig};
pub use stage::Stage;

/// Common imports for building scenes.
pub mod prelude {
    pub use crate::bridge::{self, NativeObject};
    pub use crate::dispatcher::{self, DispatchReport, Listener};
    pub use crate::error::{ScriptError, ScriptResult};
    pub use crate::heap::{Handle, Heap};
    pub use crate::leaf::{Bitmap, Drawable, TextField};
    pub use crate::player::{FrameReport, Player, PlayerConfig};
    pub use crate::sprite::{self, Sprite};
    pub use crate::stage::Stage;
    pub use crate::value::Value;
}
