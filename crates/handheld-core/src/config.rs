//! Application configuration.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::PanelId;

/// Slowest accepted poll interval.
const MAX_POLL_INTERVAL_MS: u64 = 1000;

/// Fastest accepted poll interval.
const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Where controller samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputBackend {
    /// Keyboard keys emulate the controller buttons.
    #[default]
    Keyboard,
    /// A game controller opened through SDL2.
    Sdl,
}

/// Configuration for a commander session.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CommanderConfig {
    /// Controller poll period in milliseconds.
    #[builder(default = "100")]
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Start directory of the left panel.
    #[builder(default)]
    #[serde(default)]
    pub left_path: Option<PathBuf>,

    /// Start directory of the right panel.
    #[builder(default)]
    #[serde(default)]
    pub right_path: Option<PathBuf>,

    /// Input backend.
    #[builder(default)]
    #[serde(default)]
    pub backend: InputBackend,

    /// Log filter directive used when `RUST_LOG` is unset.
    #[builder(default = "default_log_filter()")]
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Log file (None = platform cache directory).
    #[builder(default)]
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn check_poll_interval(ms: u64) -> Result<(), String> {
    if (MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&ms) {
        Ok(())
    } else {
        Err(format!(
            "poll_interval_ms must be between {MIN_POLL_INTERVAL_MS} and {MAX_POLL_INTERVAL_MS}, got {ms}"
        ))
    }
}

impl CommanderConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ms) = self.poll_interval_ms {
            check_poll_interval(ms)?;
        }
        for path in [&self.left_path, &self.right_path].into_iter().flatten().flatten() {
            if path.as_os_str().is_empty() {
                return Err("Start path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            left_path: None,
            right_path: None,
            backend: InputBackend::default(),
            log_filter: default_log_filter(),
            log_file: None,
        }
    }
}

impl CommanderConfig {
    /// Create a new config builder.
    pub fn builder() -> CommanderConfigBuilder {
        CommanderConfigBuilder::default()
    }

    /// Check values that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), crate::CommanderError> {
        check_poll_interval(self.poll_interval_ms)
            .map_err(|message| crate::CommanderError::InvalidConfig { message })
    }

    /// Configured start directory for a panel, if any.
    pub fn start_path(&self, panel: PanelId) -> Option<&PathBuf> {
        match panel {
            PanelId::Left => self.left_path.as_ref(),
            PanelId::Right => self.right_path.as_ref(),
        }
    }

    /// Poll period as a duration.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
