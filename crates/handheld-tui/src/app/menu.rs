//! Popup (action) and context menus.

use std::path::PathBuf;

use handheld_core::{Button, Direction, PanelId};
use handheld_ops::OperationKind;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Entries of the popup menu opened on a panel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PopupAction {
    Copy,
    Move,
    /// Shown but not implemented.
    Rename,
    /// Shown but not implemented.
    Delete,
}

impl PopupAction {
    /// The transfer this action starts, if any.
    pub fn operation_kind(self) -> Option<OperationKind> {
        match self {
            Self::Copy => Some(OperationKind::Copy),
            Self::Move => Some(OperationKind::Move),
            Self::Rename | Self::Delete => None,
        }
    }

    pub fn is_reserved(self) -> bool {
        self.operation_kind().is_none()
    }
}

/// Entries of the panel-wide context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ContextAction {
    Refresh,
    #[strum(to_string = "Show drives")]
    ShowDrives,
    #[strum(to_string = "Open in other panel")]
    OpenInOtherPanel,
}

/// What a menu did with one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput<T> {
    /// The button means nothing here.
    Ignored,
    /// The cursor moved.
    Moved,
    /// Close without side effects.
    Close,
    /// The item under the cursor was chosen.
    Activate(T),
}

/// A fixed list of items with a clamped cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T: Copy> Menu<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            cursor: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<T> {
        self.items.get(self.cursor).copied()
    }

    /// Move the cursor one row; a no-op at either end.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => self.cursor.checked_sub(1),
            Direction::Down => Some(self.cursor + 1).filter(|&i| i < self.items.len()),
        };
        target.map(|i| self.cursor = i).is_some()
    }

    /// Interpret one fired button.
    pub fn handle(&mut self, button: Button) -> MenuInput<T> {
        match button {
            Button::DPadUp if self.move_cursor(Direction::Up) => MenuInput::Moved,
            Button::DPadDown if self.move_cursor(Direction::Down) => MenuInput::Moved,
            Button::A => self
                .selected()
                .map_or(MenuInput::Ignored, MenuInput::Activate),
            Button::B => MenuInput::Close,
            _ => MenuInput::Ignored,
        }
    }
}

/// Action menu attached to one panel entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupMenu {
    pub menu: Menu<PopupAction>,
    /// Panel the entry was selected in.
    pub target_panel: PanelId,
    /// Index of the entry in that panel when the menu opened.
    pub target_index: usize,
    /// Path of that entry, checked again before anything runs.
    pub target_path: PathBuf,
}

impl PopupMenu {
    pub fn new(target_panel: PanelId, target_index: usize, target_path: impl Into<PathBuf>) -> Self {
        Self {
            menu: Menu::new(PopupAction::iter()),
            target_panel,
            target_index,
            target_path: target_path.into(),
        }
    }
}

/// Panel-wide secondary menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub menu: Menu<ContextAction>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(ContextAction::iter()),
        }
    }
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new()
    }
}
