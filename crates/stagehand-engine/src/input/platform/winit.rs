use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, MouseButton, PlatformEvent, PointerTracker};

/// Translates a winit `WindowEvent` into a `PlatformEvent`.
///
/// `scale_factor` converts physical cursor positions into logical pixels.
/// Returns `None` for events the stage does not receive (resize, IME, wheel,
/// key auto-repeat, ...). Focus loss clears the tracker's held sets.
pub fn translate_window_event(
    scale_factor: f64,
    tracker: &mut PointerTracker,
    event: &WindowEvent,
) -> Option<PlatformEvent> {
    match event {
        WindowEvent::Focused(false) => {
            tracker.clear_held();
            None
        }

        WindowEvent::CursorLeft { .. } => {
            tracker.pointer_pos = None;
            None
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            tracker.pointer_pos = Some((x, y));
            let (x, y) = tracker.pointer_pixels();
            Some(PlatformEvent::MouseMove { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            // Button events carry no position; use the tracked cursor.
            let (x, y) = tracker.pointer_pixels();

            match state {
                ElementState::Pressed => {
                    tracker.buttons_down.insert(button);
                    Some(PlatformEvent::MouseDown { button, x, y })
                }
                ElementState::Released => {
                    tracker.buttons_down.remove(&button);
                    Some(PlatformEvent::MouseUp { button, x, y })
                }
            }
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key);
            match event.state {
                ElementState::Pressed => tracker
                    .press_key(key)
                    .then_some(PlatformEvent::KeyDown { key }),
                ElementState::Released => tracker
                    .release_key(key)
                    .then_some(PlatformEvent::KeyUp { key }),
            }
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

pub fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

pub fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Return,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Space => Key::Space,

            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,

            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,

            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ControlLeft => Key::LeftCtrl,
            KeyCode::ControlRight => Key::RightCtrl,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::AltRight => Key::RightAlt,
            KeyCode::SuperLeft => Key::LeftGui,
            KeyCode::SuperRight => Key::RightGui,

            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,

            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,

            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; there is no stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Right).code(), 3);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }

    #[test]
    fn physical_keys_map_to_named_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Enter)).name(), "Return");
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowLeft)).name(), "Left");
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Q);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::NumLock)), Key::Unknown(_)));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut tracker = PointerTracker::default();
        tracker.press_key(Key::A);
        assert!(translate_window_event(1.0, &mut tracker, &WindowEvent::Focused(false)).is_none());
        assert!(tracker.keys_down.is_empty());
    }
}
