use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Minimal input state needed to translate platform events.
///
/// Button events on most platforms carry no position, so the last cursor
/// position is remembered here. Held keys are tracked so auto-repeat does not
/// produce a second `key_down` without an intervening `key_up`.
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl PointerTracker {
    /// Last known pointer position truncated to integer pixels, origin if unknown.
    pub fn pointer_pixels(&self) -> (i64, i64) {
        let (x, y) = self.pointer_pos.unwrap_or((0.0, 0.0));
        (x.trunc() as i64, y.trunc() as i64)
    }

    /// Records a key press; returns `false` if the key was already held.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.keys_down.insert(key)
    }

    /// Records a key release; returns `false` if the key was not held.
    pub fn release_key(&mut self, key: Key) -> bool {
        self.keys_down.remove(&key)
    }

    /// Focus loss: clear held sets to avoid stuck keys/buttons.
    pub fn clear_held(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
    }
}
