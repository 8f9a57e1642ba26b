//! Input-injection primitives.
//!
//! Thin wrappers over `enigo` for the pointer and keyboard effects the
//! dispatcher needs. Enigo calls are blocking, so everything runs inside
//! `tokio::task::block_in_place`.

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::time::Duration;

use crate::constants::DOUBLE_CLICK_PAUSE_MS;
use crate::error::{ComputerError, Result};

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Convert MouseButton to Enigo's button type
fn to_enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn input_err<E: std::fmt::Display>(e: E) -> ComputerError {
    ComputerError::Input(e.to_string())
}

fn new_enigo() -> Result<Enigo> {
    Enigo::new(&Settings::default()).map_err(input_err)
}

/// Move the pointer to an absolute position.
pub fn move_mouse(x: i32, y: i32) -> Result<()> {
    tokio::task::block_in_place(|| {
        let mut enigo = new_enigo()?;
        Mouse::move_mouse(&mut enigo, x, y, Coordinate::Abs).map_err(input_err)
    })
}

/// Drag with the left button held down to an absolute position.
pub fn drag_to(x: i32, y: i32) -> Result<()> {
    tokio::task::block_in_place(|| {
        let mut enigo = new_enigo()?;
        Mouse::button(&mut enigo, Button::Left, Direction::Press).map_err(input_err)?;
        Mouse::move_mouse(&mut enigo, x, y, Coordinate::Abs).map_err(input_err)?;
        Mouse::button(&mut enigo, Button::Left, Direction::Release).map_err(input_err)
    })
}

/// Click at the current pointer position. A double click issues exactly two
/// press/release pairs, everything else exactly one.
pub fn click(button: MouseButton, double: bool) -> Result<()> {
    tokio::task::block_in_place(|| {
        let mut enigo = new_enigo()?;
        let enigo_button = to_enigo_button(button);
        let clicks = if double { 2 } else { 1 };

        for i in 0..clicks {
            if i > 0 {
                // Small pause between clicks for double-click
                std::thread::sleep(Duration::from_millis(DOUBLE_CLICK_PAUSE_MS));
            }
            Mouse::button(&mut enigo, enigo_button, Direction::Press).map_err(input_err)?;
            Mouse::button(&mut enigo, enigo_button, Direction::Release).map_err(input_err)?;
        }

        Ok(())
    })
}

/// Type a string through the keyboard.
pub fn type_text(text: &str) -> Result<()> {
    tokio::task::block_in_place(|| {
        let mut enigo = new_enigo()?;
        Keyboard::text(&mut enigo, text).map_err(input_err)
    })
}

/// Press a key with the given modifiers held down.
pub fn press_chord(key: &str, modifiers: &[String]) -> Result<()> {
    tokio::task::block_in_place(|| {
        let mut enigo = new_enigo()?;

        // Hold down modifier keys
        for modifier in modifiers {
            if let Some(m_key) = parse_modifier(modifier) {
                Keyboard::key(&mut enigo, m_key, Direction::Press).map_err(input_err)?;
            } else {
                tracing::warn!("unknown modifier key: {}", modifier);
            }
        }

        if let Some(e_key) = parse_key(key) {
            Keyboard::key(&mut enigo, e_key, Direction::Press).map_err(input_err)?;
            Keyboard::key(&mut enigo, e_key, Direction::Release).map_err(input_err)?;
        } else {
            // Regular characters go through text entry with modifiers held
            Keyboard::text(&mut enigo, key).map_err(input_err)?;
        }

        // Release modifier keys in reverse order
        for modifier in modifiers.iter().rev() {
            if let Some(m_key) = parse_modifier(modifier) {
                Keyboard::key(&mut enigo, m_key, Direction::Release).map_err(input_err)?;
            }
        }

        Ok(())
    })
}

/// Current pointer position in physical coordinates.
pub fn cursor_position() -> Result<(i32, i32)> {
    tokio::task::block_in_place(|| {
        let enigo = new_enigo()?;
        Mouse::location(&enigo).map_err(input_err)
    })
}

/// Check if a key name corresponds to a special key in Enigo
fn parse_key(key: &str) -> Option<Key> {
    match key.to_lowercase().as_str() {
        "return" | "enter" => Some(Key::Return),
        "tab" => Some(Key::Tab),
        "space" => Some(Key::Space),
        "backspace" => Some(Key::Backspace),
        "escape" | "esc" => Some(Key::Escape),
        "up" | "uparrow" => Some(Key::UpArrow),
        "down" | "downarrow" => Some(Key::DownArrow),
        "left" | "leftarrow" => Some(Key::LeftArrow),
        "right" | "rightarrow" => Some(Key::RightArrow),
        "home" => Some(Key::Home),
        "end" => Some(Key::End),
        "pageup" => Some(Key::PageUp),
        "pagedown" => Some(Key::PageDown),
        "delete" | "del" => Some(Key::Delete),
        "f1" => Some(Key::F1),
        "f2" => Some(Key::F2),
        "f3" => Some(Key::F3),
        "f4" => Some(Key::F4),
        "f5" => Some(Key::F5),
        "f6" => Some(Key::F6),
        "f7" => Some(Key::F7),
        "f8" => Some(Key::F8),
        "f9" => Some(Key::F9),
        "f10" => Some(Key::F10),
        "f11" => Some(Key::F11),
        "f12" => Some(Key::F12),
        _ => None,
    }
}

/// Parse modifier key
fn parse_modifier(modifier: &str) -> Option<Key> {
    match modifier.to_lowercase().as_str() {
        "cmd" | "command" | "meta" | "super" | "win" => Some(Key::Meta),
        "shift" => Some(Key::Shift),
        "alt" | "option" => Some(Key::Alt),
        "control" | "ctrl" => Some(Key::Control),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert!(matches!(parse_key("enter"), Some(Key::Return)));
        assert!(matches!(parse_key("Return"), Some(Key::Return)));
        assert!(matches!(parse_key("ESC"), Some(Key::Escape)));
        assert!(matches!(parse_key("f5"), Some(Key::F5)));
        // Plain characters are not special keys
        assert!(parse_key("a").is_none());
        assert!(parse_key("hello").is_none());
    }

    #[test]
    fn test_parse_modifier() {
        assert!(matches!(parse_modifier("cmd"), Some(Key::Meta)));
        assert!(matches!(parse_modifier("Ctrl"), Some(Key::Control)));
        assert!(matches!(parse_modifier("shift"), Some(Key::Shift)));
        assert!(matches!(parse_modifier("option"), Some(Key::Alt)));
        assert!(parse_modifier("hyper").is_none());
    }
}
