//! Panel identifiers and cursor directions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One of the two directory panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize)]
pub enum PanelId {
    #[default]
    Left,
    Right,
}

impl PanelId {
    /// The other panel.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Stable index for per-panel arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Vertical cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}
