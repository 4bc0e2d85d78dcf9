//! hcmd - A dual-pane file manager driven by a game controller.
//!
//! Usage:
//!   hcmd                          Open both panels in the default directory
//!   hcmd --left ~/docs --right /mnt/sd
//!   hcmd --backend sdl            Read a real controller (needs the `sdl` feature)
//!   hcmd --help                   Show help

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use handheld_core::{CommanderConfig, InputBackend};

#[derive(Parser)]
#[command(
    name = "hcmd",
    version,
    about = "A dual-pane file manager driven by a game controller",
    long_about = "hcmd browses two directories side by side and copies or moves \
                  entries between them using only controller buttons.\n\n\
                  Without a controller the keyboard stands in: arrows move, \
                  Enter/Backspace enter and leave directories, x/y open menus, \
                  q asks to quit."
)]
struct Cli {
    /// Start directory of the left panel
    #[arg(short, long)]
    left: Option<PathBuf>,

    /// Start directory of the right panel
    #[arg(short, long)]
    right: Option<PathBuf>,

    /// Controller poll period in milliseconds
    #[arg(short, long)]
    poll_ms: Option<u64>,

    /// Input backend
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Keyboard,
    Sdl,
}

impl From<Backend> for InputBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Keyboard => InputBackend::Keyboard,
            Backend::Sdl => InputBackend::Sdl,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logging needs the config, so a bad settings file is reported once it is up.
    let (mut config, load_error) = match handheld_tui::load_config(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (CommanderConfig::default(), Some(err)),
    };
    apply_overrides(&mut config, cli);
    config.validate().context("Invalid settings")?;

    let log_file = config
        .log_file
        .clone()
        .or_else(handheld_tui::default_log_file)
        .unwrap_or_else(|| PathBuf::from("hcmd.log"));
    init_logging(&log_file, &config.log_filter)?;

    if let Some(err) = load_error {
        tracing::warn!(error = %err, "Ignoring settings file, using defaults");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.backend,
        poll_ms = config.poll_interval_ms,
        "Starting"
    );

    handheld_tui::run(&config)
}

/// Command-line flags win over the settings file.
fn apply_overrides(config: &mut CommanderConfig, cli: Cli) {
    if let Some(left) = cli.left {
        config.left_path = Some(left);
    }
    if let Some(right) = cli.right {
        config.right_path = Some(right);
    }
    if let Some(ms) = cli.poll_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }
}

/// Send logs to a file so they stay out of the terminal UI.
fn init_logging(path: &Path, default_filter: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}
