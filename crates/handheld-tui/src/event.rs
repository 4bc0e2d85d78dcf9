//! Button hints for the footer.

use handheld_core::Button;

use crate::app::LayerId;

/// A button and what it does in the current layer.
pub type Hint = (&'static str, &'static str);

const NAVIGATION_HINTS: &[Hint] = &[
    ("Up/Down", "Move"),
    ("LB/RB", "Panel"),
    ("A", "Open"),
    ("B", "Up"),
    ("X", "Actions"),
    ("Y", "Menu"),
    ("Start", "Quit"),
];

const MENU_HINTS: &[Hint] = &[("Up/Down", "Move"), ("A", "Select"), ("B", "Close")];

const CONFIRM_HINTS: &[Hint] = &[("A", "OK"), ("B", "Cancel")];

const INFO_HINTS: &[Hint] = &[("A/B", "Dismiss")];

/// Hints for the layer that currently receives edges.
pub fn hints(layer: LayerId, confirmation: bool) -> &'static [Hint] {
    match layer {
        LayerId::Navigation => NAVIGATION_HINTS,
        LayerId::ContextMenu | LayerId::PopupMenu => MENU_HINTS,
        LayerId::Dialog if confirmation => CONFIRM_HINTS,
        LayerId::Dialog => INFO_HINTS,
    }
}

/// Chord that quits from anywhere.
pub fn quit_chord() -> String {
    format!("{}+{}", Button::Start, Button::Select)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_hints_depend_on_kind() {
        assert_eq!(hints(LayerId::Dialog, true), CONFIRM_HINTS);
        assert_eq!(hints(LayerId::Dialog, false), INFO_HINTS);
        assert_eq!(hints(LayerId::PopupMenu, false), MENU_HINTS);
    }

    #[test]
    fn test_quit_chord() {
        assert_eq!(quit_chord(), "Start+Select");
    }
}
