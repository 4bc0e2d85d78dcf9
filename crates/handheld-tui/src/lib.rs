//! Terminal user interface for handheld-commander.
//!
//! This crate holds the dispatch state machine that turns controller edges
//! into panel navigation, menus and confirmed file operations, and the
//! ratatui front end that draws it.
//!
//! # Overview
//!
//! - **Navigation** - two panels, each with a clamped selection
//! - **Popup menu** (X) - Copy or Move the selected entry to the other panel
//! - **Context menu** (Y) - Refresh, Show drives, Open in other panel
//! - **Dialogs** - OK/Cancel confirmations and informational messages
//!
//! Edges go to exactly one layer, chosen in the order
//! Dialog > PopupMenu > ContextMenu > Navigation.
//!
//! # Usage
//!
//! ```rust,no_run
//! use handheld_core::CommanderConfig;
//!
//! handheld_tui::run(&CommanderConfig::default()).unwrap();
//! ```
//!
//! # Controls
//!
//! - `Up`/`Down` - Move selection
//! - `LB`/`RB` - Activate left/right panel
//! - `A` - Open directory or file
//! - `B` - Parent directory, close menu, cancel dialog
//! - `X` - Actions for the selected entry
//! - `Y` - Panel menu
//! - `Start` - Quit (with confirmation)
//! - `Start`+`Select` - Quit immediately

pub mod app;
mod event;
mod theme;
mod ui;

pub use app::settings::{default_log_file, load_config, settings_path};
pub use app::{App, AppResult, Commander};
pub use theme::Theme;

use handheld_core::CommanderConfig;

/// Run the TUI application.
pub fn run(config: &CommanderConfig) -> AppResult<()> {
    // Create tokio runtime for the event loop and blocking file operations
    let rt = tokio::runtime::Runtime::new()?;

    let app = App::new(config);
    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Do not wait on a copy or move that is still running
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
