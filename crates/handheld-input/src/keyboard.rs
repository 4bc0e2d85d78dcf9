//! Keyboard-emulated controller.
//!
//! Terminals report key presses (and auto-repeat) but rarely releases, so a
//! key counts as held in every poll that saw a press or repeat for it and as
//! released in the first poll that did not.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use handheld_core::{Button, ButtonSample, ButtonSet};
use tracing::warn;

use crate::GamepadSource;

/// Map a key event to the controller buttons it emulates.
pub fn map_key(key: KeyEvent) -> ButtonSet {
    let button = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return ButtonSet::from(Button::Start).with(Button::Select);
        }

        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Button::DPadUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Button::DPadDown,
        (KeyCode::Left, _) => Button::DPadLeft,
        (KeyCode::Right, _) => Button::DPadRight,

        (KeyCode::Enter, _) | (KeyCode::Char('a'), KeyModifiers::NONE) => Button::A,
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            Button::B
        }
        (KeyCode::Char('x'), KeyModifiers::NONE) => Button::X,
        (KeyCode::Char('y'), KeyModifiers::NONE) => Button::Y,

        (KeyCode::Char('['), _) | (KeyCode::BackTab, _) => Button::LeftShoulder,
        (KeyCode::Char(']'), _) | (KeyCode::Tab, _) => Button::RightShoulder,

        (KeyCode::Char('s' | 'q'), KeyModifiers::NONE) => Button::Start,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Button::Select,

        _ => return ButtonSet::EMPTY,
    };
    ButtonSet::from(button)
}

/// A controller emulated by the terminal keyboard.
#[derive(Debug, Default)]
pub struct KeyboardPad {
    failed: bool,
}

impl KeyboardPad {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GamepadSource for KeyboardPad {
    fn poll(&mut self) -> Option<ButtonSample> {
        let mut sample = ButtonSet::EMPTY;

        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    if !self.failed {
                        warn!("Keyboard input unavailable: {e}");
                        self.failed = true;
                    }
                    return None;
                }
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    sample = sample.union(map_key(key));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read key event: {e}");
                    break;
                }
            }
        }

        self.failed = false;
        Some(sample)
    }

    fn name(&self) -> &str {
        "keyboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_dpad_keys() {
        assert_eq!(map_key(key(KeyCode::Up)), ButtonSet::from(Button::DPadUp));
        assert_eq!(map_key(key(KeyCode::Char('j'))), ButtonSet::from(Button::DPadDown));
    }

    #[test]
    fn test_face_buttons() {
        assert_eq!(map_key(key(KeyCode::Enter)), ButtonSet::from(Button::A));
        assert_eq!(map_key(key(KeyCode::Esc)), ButtonSet::from(Button::B));
        assert_eq!(map_key(key(KeyCode::Char('x'))), ButtonSet::from(Button::X));
        assert_eq!(map_key(key(KeyCode::Char('y'))), ButtonSet::from(Button::Y));
    }

    #[test]
    fn test_shoulders() {
        assert_eq!(map_key(key(KeyCode::Char('['))), ButtonSet::from(Button::LeftShoulder));
        assert_eq!(map_key(key(KeyCode::Tab)), ButtonSet::from(Button::RightShoulder));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            ButtonSet::from(Button::LeftShoulder)
        );
    }

    #[test]
    fn test_ctrl_c_is_start_select_chord() {
        let chord = map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(chord.contains(Button::Start));
        assert!(chord.contains(Button::Select));
    }

    #[test]
    fn test_unmapped_key() {
        assert!(map_key(key(KeyCode::Char('z'))).is_empty());
    }
}
