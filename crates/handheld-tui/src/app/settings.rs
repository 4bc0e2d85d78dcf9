//! Settings file and platform directories.

use std::path::{Path, PathBuf};

use handheld_core::{CommanderConfig, CommanderError};

use super::constants::{APP_DIR_NAME, SETTINGS_FILE_NAME};

/// Default settings file location.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Default log file location.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR_NAME).join("hcmd.log"))
}

/// Where a panel starts when no directory is configured: documents, then
/// home, then the working directory.
pub fn default_start_dir() -> PathBuf {
    dirs::document_dir()
        .filter(|dir| dir.is_dir())
        .or_else(dirs::home_dir)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
}

/// Load settings from `path`, or from [`settings_path`] when `None`.
///
/// A missing default file yields the defaults; an explicitly named file must
/// exist. Malformed or out-of-range values are errors.
pub fn load_config(path: Option<&Path>) -> Result<CommanderConfig, CommanderError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match settings_path() {
            Some(path) => (path, false),
            None => return Ok(CommanderConfig::default()),
        },
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CommanderConfig::default());
        }
        Err(e) => return Err(CommanderError::io(path, e)),
    };

    let config: CommanderConfig =
        toml::from_str(&content).map_err(|e| CommanderError::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use handheld_core::InputBackend;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = 50\nbackend = \"sdl\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.backend, InputBackend::Sdl);
        assert_eq!(config.log_filter, "info");
        assert!(config.left_path.is_none());
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = \"fast\"").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CommanderError::InvalidConfig { .. }));
    }

    #[test]
    fn test_out_of_range_interval_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = 5").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("absent.toml"))).unwrap_err();
        assert!(err.is_not_found());
    }
}
