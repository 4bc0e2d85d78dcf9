//! Core types for handheld-commander.
//!
//! This crate holds the vocabulary shared by the input, operations and TUI
//! crates: controller buttons and per-tick button sets, panel identifiers,
//! directory entries, configuration and the common error type.

mod button;
mod config;
mod entry;
mod error;
mod panel;

pub use button::{Button, ButtonSample, ButtonSet};
pub use config::{CommanderConfig, CommanderConfigBuilder, InputBackend};
pub use entry::{EntryKind, FileEntry, PARENT_MARKER};
pub use error::CommanderError;
pub use panel::{Direction, PanelId};
