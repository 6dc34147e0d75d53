//! Script-visible classes.
//!
//! Class hierarchy:
//! - `Object`: `inspect`, `to_s`, `class_name`, `is_a?`, `respond_to?`
//! - `EventDispatcher < Object`: `on`, `off`, `dispatch`, `has_listeners?`,
//!   `listener_count`
//! - `Sprite < EventDispatcher`: transform accessors, tree structure,
//!   `global_to_local`, `collide?`
//! - `Bitmap < Sprite`, `TextField < Sprite`: drawable leaves

mod args;
mod dispatcher;
mod leaf;
mod object;
mod sprite;

pub use dispatcher::CLASS as EVENT_DISPATCHER;
pub use leaf::{BITMAP, TEXT_FIELD};

use crate::error::ScriptResult;
use crate::heap::Heap;
use crate::stage::Stage;

/// Registers every class and its methods. Safe to call more than once.
pub fn define_classes(heap: &mut Heap) -> ScriptResult<()> {
    object::define(heap)?;
    dispatcher::define(heap)?;
    sprite::define(heap)?;
    leaf::define(heap)
}

/// Registers the classes and installs the stage.
pub fn install(heap: &mut Heap) -> ScriptResult<Stage> {
    define_classes(heap)?;
    Stage::install(heap)
}
