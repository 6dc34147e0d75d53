use std::fmt;

/// Keyboard key identifier.
///
/// The runtime maps platform keycodes into these variants where possible.
/// Keys without a variant become `Key::Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Return,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    Up,
    Down,
    Left,
    Right,

    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftGui,
    RightGui,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Human-readable key name delivered to `key_down` / `key_up` listeners.
    ///
    /// Names follow the long-standing desktop convention ("A", "Return",
    /// "Left Shift", "F5"). Unknown keys have an empty name.
    pub fn name(self) -> &'static str {
        use Key::*;
        match self {
            Escape => "Escape",
            Return => "Return",
            Tab => "Tab",
            Backspace => "Backspace",
            Space => "Space",
            Insert => "Insert",
            Delete => "Delete",
            Home => "Home",
            End => "End",
            PageUp => "PageUp",
            PageDown => "PageDown",
            Up => "Up",
            Down => "Down",
            Left => "Left",
            Right => "Right",
            LeftShift => "Left Shift",
            RightShift => "Right Shift",
            LeftCtrl => "Left Ctrl",
            RightCtrl => "Right Ctrl",
            LeftAlt => "Left Alt",
            RightAlt => "Right Alt",
            LeftGui => "Left GUI",
            RightGui => "Right GUI",
            A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
            H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
            O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
            V => "V", W => "W", X => "X", Y => "Y", Z => "Z",
            Digit0 => "0", Digit1 => "1", Digit2 => "2", Digit3 => "3", Digit4 => "4",
            Digit5 => "5", Digit6 => "6", Digit7 => "7", Digit8 => "8", Digit9 => "9",
            F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
            F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11", F12 => "F12",
            Unknown(_) => "",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Numeric button code delivered to `mouse_down` / `mouse_up` listeners:
    /// left 1, middle 2, right 3, back 4, forward 5, others from 6 upward.
    pub fn code(self) -> i64 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::Back => 4,
            MouseButton::Forward => 5,
            MouseButton::Other(n) => 6 + i64::from(n),
        }
    }
}

/// Raw platform input, already reduced to the fixed set the stage understands.
///
/// Coordinates are logical pixels truncated to integers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlatformEvent {
    MouseMove { x: i64, y: i64 },
    MouseDown { button: MouseButton, x: i64, y: i64 },
    MouseUp { button: MouseButton, x: i64, y: i64 },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

impl PlatformEvent {
    /// Event name as seen by stage listeners.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformEvent::MouseMove { .. } => "mouse_move",
            PlatformEvent::MouseDown { .. } => "mouse_down",
            PlatformEvent::MouseUp { .. } => "mouse_up",
            PlatformEvent::KeyDown { .. } => "key_down",
            PlatformEvent::KeyUp { .. } => "key_up",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_follow_classic_numbering() {
        assert_eq!(MouseButton::Left.code(), 1);
        assert_eq!(MouseButton::Middle.code(), 2);
        assert_eq!(MouseButton::Right.code(), 3);
        assert_eq!(MouseButton::Other(2).code(), 8);
    }

    #[test]
    fn event_names_match_listener_names() {
        assert_eq!(PlatformEvent::MouseMove { x: 0, y: 0 }.name(), "mouse_move");
        assert_eq!(
            PlatformEvent::MouseUp { button: MouseButton::Left, x: 1, y: 2 }.name(),
            "mouse_up"
        );
        assert_eq!(PlatformEvent::KeyDown { key: Key::A }.name(), "key_down");
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::Return.name(), "Return");
        assert_eq!(Key::LeftShift.to_string(), "Left Shift");
        assert_eq!(Key::Digit7.name(), "7");
        assert_eq!(Key::Unknown(99).name(), "");
    }
}
