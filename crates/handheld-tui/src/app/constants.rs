//! Application constants.

/// Redraw check interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Title shown for a panel in the drive view.
pub const DRIVES_TITLE: &str = "Drives";

/// Directory under the platform config/cache dirs.
pub const APP_DIR_NAME: &str = "handheld-commander";

/// Settings file name inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "config.toml";
