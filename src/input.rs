//! Key and mouse-button naming, and pointer coordinate conversion.
//!
//! Sketches receive keys as upper-case names ("A", "_1", "ESCAPE", "LEFT")
//! instead of raw key codes. Keys are identified by physical position, so
//! the names do not change with the keyboard layout.

use crate::canvas::Coord;
use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::KeyA, "A"),
    (KeyCode::KeyB, "B"),
    (KeyCode::KeyC, "C"),
    (KeyCode::KeyD, "D"),
    (KeyCode::KeyE, "E"),
    (KeyCode::KeyF, "F"),
    (KeyCode::KeyG, "G"),
    (KeyCode::KeyH, "H"),
    (KeyCode::KeyI, "I"),
    (KeyCode::KeyJ, "J"),
    (KeyCode::KeyK, "K"),
    (KeyCode::KeyL, "L"),
    (KeyCode::KeyM, "M"),
    (KeyCode::KeyN, "N"),
    (KeyCode::KeyO, "O"),
    (KeyCode::KeyP, "P"),
    (KeyCode::KeyQ, "Q"),
    (KeyCode::KeyR, "R"),
    (KeyCode::KeyS, "S"),
    (KeyCode::KeyT, "T"),
    (KeyCode::KeyU, "U"),
    (KeyCode::KeyV, "V"),
    (KeyCode::KeyW, "W"),
    (KeyCode::KeyX, "X"),
    (KeyCode::KeyY, "Y"),
    (KeyCode::KeyZ, "Z"),
    (KeyCode::Digit0, "_0"),
    (KeyCode::Digit1, "_1"),
    (KeyCode::Digit2, "_2"),
    (KeyCode::Digit3, "_3"),
    (KeyCode::Digit4, "_4"),
    (KeyCode::Digit5, "_5"),
    (KeyCode::Digit6, "_6"),
    (KeyCode::Digit7, "_7"),
    (KeyCode::Digit8, "_8"),
    (KeyCode::Digit9, "_9"),
    (KeyCode::Numpad0, "NUM_0"),
    (KeyCode::Numpad1, "NUM_1"),
    (KeyCode::Numpad2, "NUM_2"),
    (KeyCode::Numpad3, "NUM_3"),
    (KeyCode::Numpad4, "NUM_4"),
    (KeyCode::Numpad5, "NUM_5"),
    (KeyCode::Numpad6, "NUM_6"),
    (KeyCode::Numpad7, "NUM_7"),
    (KeyCode::Numpad8, "NUM_8"),
    (KeyCode::Numpad9, "NUM_9"),
    (KeyCode::NumpadAdd, "NUM_ADD"),
    (KeyCode::NumpadSubtract, "NUM_SUBTRACT"),
    (KeyCode::NumpadMultiply, "NUM_MULTIPLY"),
    (KeyCode::NumpadDivide, "NUM_DIVIDE"),
    (KeyCode::NumpadDecimal, "NUM_DECIMAL"),
    (KeyCode::NumpadEnter, "NUM_ENTER"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::Escape, "ESCAPE"),
    (KeyCode::Space, "SPACE"),
    (KeyCode::Enter, "ENTER"),
    (KeyCode::Tab, "TAB"),
    (KeyCode::Backspace, "BACKSPACE"),
    (KeyCode::Delete, "DELETE"),
    (KeyCode::Insert, "INSERT"),
    (KeyCode::Home, "HOME"),
    (KeyCode::End, "END"),
    (KeyCode::PageUp, "PAGEUP"),
    (KeyCode::PageDown, "PAGEDOWN"),
    (KeyCode::ArrowLeft, "LEFT"),
    (KeyCode::ArrowRight, "RIGHT"),
    (KeyCode::ArrowUp, "UP"),
    (KeyCode::ArrowDown, "DOWN"),
    (KeyCode::ShiftLeft, "LSHIFT"),
    (KeyCode::ShiftRight, "RSHIFT"),
    (KeyCode::ControlLeft, "LCTRL"),
    (KeyCode::ControlRight, "RCTRL"),
    (KeyCode::AltLeft, "LALT"),
    (KeyCode::AltRight, "RALT"),
    (KeyCode::SuperLeft, "LMETA"),
    (KeyCode::SuperRight, "RMETA"),
    (KeyCode::CapsLock, "CAPSLOCK"),
    (KeyCode::NumLock, "NUMLOCK"),
    (KeyCode::ScrollLock, "SCROLLLOCK"),
    (KeyCode::PrintScreen, "PRINT"),
    (KeyCode::Pause, "PAUSE"),
    (KeyCode::ContextMenu, "MENU"),
    (KeyCode::Minus, "MINUS"),
    (KeyCode::Equal, "EQUAL"),
    (KeyCode::BracketLeft, "BRACKETLEFT"),
    (KeyCode::BracketRight, "BRACKETRIGHT"),
    (KeyCode::Backslash, "BACKSLASH"),
    (KeyCode::Semicolon, "SEMICOLON"),
    (KeyCode::Quote, "APOSTROPHE"),
    (KeyCode::Backquote, "GRAVE"),
    (KeyCode::Comma, "COMMA"),
    (KeyCode::Period, "PERIOD"),
    (KeyCode::Slash, "SLASH"),
];

const MOUSE_BUTTON_NAMES: &[(MouseButton, &str)] = &[
    (MouseButton::Left, "LEFT"),
    (MouseButton::Middle, "MIDDLE"),
    (MouseButton::Right, "RIGHT"),
    (MouseButton::Back, "MOUSE4"),
    (MouseButton::Forward, "MOUSE5"),
];

/// Name of a physical key, or `None` for keys the facade does not report.
pub fn key_name(code: KeyCode) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// Name of a mouse button, or `None` for extra buttons.
pub fn mouse_button_name(button: MouseButton) -> Option<&'static str> {
    MOUSE_BUTTON_NAMES
        .iter()
        .find(|(b, _)| *b == button)
        .map(|(_, name)| *name)
}

/// Every key name, sorted.
pub fn all_key_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = KEY_NAMES.iter().map(|(_, name)| *name).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Every mouse button name, sorted.
pub fn all_mouse_button_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = MOUSE_BUTTON_NAMES.iter().map(|(_, name)| *name).collect();
    names.sort_unstable();
    names
}

/// Convert a winit cursor position (physical pixels, origin top-left) into
/// screen coordinates (logical pixels, origin bottom-left).
pub fn to_screen_coords(
    position: PhysicalPosition<f64>,
    scale_factor: f64,
    screen_height: f64,
) -> Coord {
    let logical = position.to_logical::<f64>(scale_factor);
    (logical.x as f32, (screen_height - logical.y) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::KeyQ), Some("Q"));
        assert_eq!(key_name(KeyCode::Escape), Some("ESCAPE"));
        assert_eq!(key_name(KeyCode::Digit7), Some("_7"));
        assert_eq!(key_name(KeyCode::ArrowLeft), Some("LEFT"));
        assert_eq!(key_name(KeyCode::F24), None);
    }

    #[test]
    fn test_mouse_button_names() {
        assert_eq!(mouse_button_name(MouseButton::Left), Some("LEFT"));
        assert_eq!(mouse_button_name(MouseButton::Back), Some("MOUSE4"));
        assert_eq!(mouse_button_name(MouseButton::Other(9)), None);
    }

    #[test]
    fn test_all_names_sorted_and_unique() {
        let keys = all_key_names();
        assert_eq!(keys.len(), KEY_NAMES.len());
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert!(keys.contains(&"SPACE"));

        let buttons = all_mouse_button_names();
        assert_eq!(buttons, vec!["LEFT", "MIDDLE", "MOUSE4", "MOUSE5", "RIGHT"]);
    }

    #[test]
    fn test_screen_coords_flip_and_scale() {
        let pos = PhysicalPosition::new(200.0, 100.0);
        assert_eq!(to_screen_coords(pos, 2.0, 800.0), (100.0, 750.0));
        assert_eq!(to_screen_coords(pos, 1.0, 800.0), (200.0, 700.0));
    }
}
