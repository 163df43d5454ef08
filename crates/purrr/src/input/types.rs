use std::fmt;
use std::ops::Index;

use bitflags::bitflags;
use purrr_sys as sys;

/// Keyboard key identifier.
///
/// Discriminants are the native key codes. Printable keys use their ASCII
/// value (`Key::A as i32 == 'A' as i32`); the remaining keys continue
/// consecutively after `GraveAccent`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Key {
    // Printable
    Space = ' ' as i32,
    Apostrophe = '\'' as i32,
    Comma = ',' as i32,
    Minus = '-' as i32,
    Period = '.' as i32,
    Slash = '/' as i32,

    Digit0 = '0' as i32,
    Digit1 = '1' as i32,
    Digit2 = '2' as i32,
    Digit3 = '3' as i32,
    Digit4 = '4' as i32,
    Digit5 = '5' as i32,
    Digit6 = '6' as i32,
    Digit7 = '7' as i32,
    Digit8 = '8' as i32,
    Digit9 = '9' as i32,

    Semicolon = ';' as i32,
    Equal = '=' as i32,

    A = 'A' as i32,
    B = 'B' as i32,
    C = 'C' as i32,
    D = 'D' as i32,
    E = 'E' as i32,
    F = 'F' as i32,
    G = 'G' as i32,
    H = 'H' as i32,
    I = 'I' as i32,
    J = 'J' as i32,
    K = 'K' as i32,
    L = 'L' as i32,
    M = 'M' as i32,
    N = 'N' as i32,
    O = 'O' as i32,
    P = 'P' as i32,
    Q = 'Q' as i32,
    R = 'R' as i32,
    S = 'S' as i32,
    T = 'T' as i32,
    U = 'U' as i32,
    V = 'V' as i32,
    W = 'W' as i32,
    X = 'X' as i32,
    Y = 'Y' as i32,
    Z = 'Z' as i32,

    LeftBracket = '[' as i32,
    Backslash = '\\' as i32,
    RightBracket = ']' as i32,
    GraveAccent = '`' as i32,

    // Modifiers as keys
    LeftControl,
    RightControl,
    LeftShift,
    RightShift,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    // Editing / navigation
    Backspace,
    Delete,
    End,
    Enter,
    Escape,
    Home,
    Insert,
    Menu,
    PageDown,
    PageUp,
    Pause,
    Tab,

    // Locks
    CapsLock,
    NumLock,
    ScrollLock,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,

    PrintScreen,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Numpad
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadDecimal,
    NumpadDivide,
    NumpadEnter,
    NumpadEqual,
    NumpadMultiply,
    NumpadSubtract,

    World2,
}

impl Key {
    /// Every key, in discriminant order.
    pub const ALL: [Key; 118] = [
        Key::Space, Key::Apostrophe, Key::Comma, Key::Minus, Key::Period, Key::Slash,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::Semicolon, Key::Equal,
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::LeftBracket, Key::Backslash, Key::RightBracket, Key::GraveAccent,
        Key::LeftControl, Key::RightControl, Key::LeftShift, Key::RightShift,
        Key::LeftAlt, Key::RightAlt, Key::LeftSuper, Key::RightSuper,
        Key::Backspace, Key::Delete, Key::End, Key::Enter, Key::Escape, Key::Home,
        Key::Insert, Key::Menu, Key::PageDown, Key::PageUp, Key::Pause, Key::Tab,
        Key::CapsLock, Key::NumLock, Key::ScrollLock,
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
        Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        Key::F13, Key::F14, Key::F15, Key::F16, Key::F17, Key::F18,
        Key::F19, Key::F20, Key::F21, Key::F22, Key::F23, Key::F24,
        Key::PrintScreen,
        Key::Left, Key::Right, Key::Up, Key::Down,
        Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
        Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
        Key::NumpadAdd, Key::NumpadDecimal, Key::NumpadDivide, Key::NumpadEnter,
        Key::NumpadEqual, Key::NumpadMultiply, Key::NumpadSubtract,
        Key::World2,
    ];

    /// Native key code.
    #[inline]
    pub fn code(self) -> sys::Purrr_Key {
        self as sys::Purrr_Key
    }
}

impl TryFrom<sys::Purrr_Key> for Key {
    type Error = sys::Purrr_Key;

    /// Maps a native key code back to a `Key`; unknown codes are returned as the error.
    fn try_from(code: sys::Purrr_Key) -> Result<Self, Self::Error> {
        Key::ALL
            .iter()
            .copied()
            .find(|k| k.code() == code)
            .ok_or(code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Key or button transition reported to callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = sys::PURRR_ACTION_RELEASE,
    Press = sys::PURRR_ACTION_PRESS,
    Repeat = sys::PURRR_ACTION_REPEAT,
}

impl TryFrom<sys::Purrr_Action> for Action {
    type Error = sys::Purrr_Action;

    fn try_from(code: sys::Purrr_Action) -> Result<Self, Self::Error> {
        match code {
            sys::PURRR_ACTION_RELEASE => Ok(Action::Release),
            sys::PURRR_ACTION_PRESS => Ok(Action::Press),
            sys::PURRR_ACTION_REPEAT => Ok(Action::Repeat),
            other => Err(other),
        }
    }
}

/// Mouse button identifier, numbered from zero as the native library does.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
    Button4 = 3,
    Button5 = 4,
}

impl MouseButton {
    #[inline]
    pub fn code(self) -> sys::Purrr_Mouse_Button {
        self as sys::Purrr_Mouse_Button
    }
}

impl TryFrom<sys::Purrr_Mouse_Button> for MouseButton {
    type Error = sys::Purrr_Mouse_Button;

    fn try_from(code: sys::Purrr_Mouse_Button) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MouseButton::Left),
            1 => Ok(MouseButton::Middle),
            2 => Ok(MouseButton::Right),
            3 => Ok(MouseButton::Button4),
            4 => Ok(MouseButton::Button5),
            other => Err(other),
        }
    }
}

bitflags! {
    /// Modifier keys held during a key or button event.
    ///
    /// The bit layout is the native encoding, so values cross the FFI
    /// boundary as a plain byte.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
    }
}

impl Index<KeyModifiers> for KeyModifiers {
    type Output = bool;

    /// `mods[KeyModifiers::SHIFT]` is true when every bit of the index is set.
    fn index(&self, modifier: KeyModifiers) -> &bool {
        if self.contains(modifier) { &true } else { &false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Key ───────────────────────────────────────────────────────────────

    #[test]
    fn printable_keys_are_ascii() {
        assert_eq!(Key::Space as i32, ' ' as i32);
        assert_eq!(Key::Apostrophe as i32, '\'' as i32);
        assert_eq!(Key::Digit0 as i32, '0' as i32);
        assert_eq!(Key::Digit9 as i32, '9' as i32);
        assert_eq!(Key::A as i32, 'A' as i32);
        assert_eq!(Key::Z as i32, 'Z' as i32);
        assert_eq!(Key::Backslash as i32, '\\' as i32);
        assert_eq!(Key::GraveAccent as i32, '`' as i32);
    }

    #[test]
    fn non_printable_keys_follow_grave_accent() {
        assert_eq!(Key::LeftControl as i32, 97);
        assert_eq!(Key::Backspace as i32, 105);
        assert_eq!(Key::F1 as i32, 120);
        assert_eq!(Key::F24 as i32, 143);
        assert_eq!(Key::Numpad0 as i32, 149);
        assert_eq!(Key::World2 as i32, 166);
    }

    #[test]
    fn all_is_sorted_and_complete() {
        for pair in Key::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{} before {}", pair[0], pair[1]);
        }
        // Contiguous tail after GraveAccent.
        let tail = Key::ALL.iter().skip_while(|k| **k != Key::LeftControl);
        for (offset, key) in tail.enumerate() {
            assert_eq!(key.code(), 97 + offset as i32);
        }
    }

    #[test]
    fn key_codes_map_back() {
        for key in Key::ALL {
            assert_eq!(Key::try_from(key.code()), Ok(key));
        }
        assert_eq!(Key::try_from(0), Err(0));
        assert_eq!(Key::try_from('a' as i32), Ok(Key::LeftControl));
        assert_eq!(Key::try_from(167), Err(167));
    }

    // ── Action / MouseButton ──────────────────────────────────────────────

    #[test]
    fn actions_match_native_codes() {
        assert_eq!(Action::try_from(sys::PURRR_ACTION_PRESS), Ok(Action::Press));
        assert_eq!(Action::Repeat as i32, sys::PURRR_ACTION_REPEAT);
        assert_eq!(Action::try_from(7), Err(7));
    }

    #[test]
    fn mouse_buttons_round_trip() {
        for b in [
            MouseButton::Left,
            MouseButton::Middle,
            MouseButton::Right,
            MouseButton::Button4,
            MouseButton::Button5,
        ] {
            assert_eq!(MouseButton::try_from(b.code()), Ok(b));
        }
        assert_eq!(MouseButton::try_from(5), Err(5));
    }

    // ── KeyModifiers ──────────────────────────────────────────────────────

    const EACH: [KeyModifiers; 6] = [
        KeyModifiers::SHIFT,
        KeyModifiers::CONTROL,
        KeyModifiers::ALT,
        KeyModifiers::SUPER,
        KeyModifiers::CAPS_LOCK,
        KeyModifiers::NUM_LOCK,
    ];

    #[test]
    fn modifier_bits_match_native_layout() {
        for (bit, m) in EACH.iter().enumerate() {
            assert_eq!(m.bits(), 1 << bit);
        }
    }

    #[test]
    fn insert_then_contains() {
        for m in EACH {
            let mut mods = KeyModifiers::empty();
            mods.insert(m);
            assert!(mods.contains(m));
            assert!(mods[m]);
        }
    }

    #[test]
    fn remove_then_not_contains() {
        for m in EACH {
            let mut mods = KeyModifiers::all();
            mods.remove(m);
            assert!(!mods[m]);
        }
    }

    #[test]
    fn flags_are_independent() {
        for x in EACH {
            for y in EACH.into_iter().filter(|y| *y != x) {
                let mut mods = KeyModifiers::empty();
                mods.insert(y);
                mods.insert(x);
                mods.remove(x);
                assert!(mods[y], "removing {x:?} cleared {y:?}");

                let mut mods = KeyModifiers::empty();
                mods.insert(x);
                assert!(!mods[y], "setting {x:?} set {y:?}");
            }
        }
    }

    #[test]
    fn raw_byte_is_kept() {
        let mods = KeyModifiers::from_bits_retain(0b0000_0101);
        assert!(mods[KeyModifiers::SHIFT]);
        assert!(mods[KeyModifiers::ALT]);
        assert!(!mods[KeyModifiers::CONTROL]);
    }
}
