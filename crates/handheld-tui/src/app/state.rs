//! Observable state types.

use handheld_core::PanelId;
use handheld_ops::PendingOperation;

/// A discrete change to state the presentation layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// A panel moved to another directory or to the drive view.
    Location(PanelId),
    /// A panel's entry list was replaced.
    Entries(PanelId),
    /// A panel's selected index moved.
    Selection(PanelId),
    /// The active panel flipped.
    ActivePanel,
    /// An overlay opened or closed, or its contents changed.
    Layer,
    /// The status line changed.
    Status,
    /// Operation progress changed.
    Progress,
}

/// Work the state machine asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a confirmed copy or move.
    Execute(PendingOperation),
    /// Leave the application.
    Quit,
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line message shown under the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}
