//! Main application state and logic.

mod commander;
mod confirm;
mod constants;
mod layer;
mod menu;
mod panel;
mod render;
pub mod settings;
mod state;

use std::time::Duration;

use ratatui::layout::Size;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{info, warn};

use handheld_core::{ButtonSet, CommanderConfig, InputBackend, PanelId};
use handheld_input::{KeyboardPad, PollerHandle, spawn_poller};
use handheld_ops::{LocalFileSystem, OperationExecutor, OperationResult};

use crate::theme::Theme;

use self::constants::TICK_INTERVAL_MS;
use self::render::render_app;

pub use self::commander::Commander;
pub use self::confirm::{ConfirmationWorkflow, Dialog, DialogInput, DialogKind, Resumed};
pub use self::layer::{LayerId, ModalStack, Overlay, Transition};
pub use self::menu::{ContextAction, ContextMenu, Menu, MenuInput, PopupAction, PopupMenu};
pub use self::panel::{PanelLocation, PanelState};
pub use self::state::{Change, Effect, StatusKind, StatusMessage};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// The running application: state machine, operation runner and terminal.
pub struct App {
    /// Panels, layers and confirmation state.
    commander: Commander<LocalFileSystem>,
    /// Runs confirmed operations.
    executor: OperationExecutor,
    /// Results of the running operation.
    operation_rx: Option<mpsc::Receiver<OperationResult>>,
    /// Color theme.
    theme: Theme,
    /// Controller backend.
    backend: InputBackend,
    /// Controller poll period.
    poll_interval: Duration,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
    /// Terminal size at the last draw.
    last_size: Option<Size>,
    should_quit: bool,
}

impl App {
    /// Create the application and list both start directories.
    pub fn new(config: &CommanderConfig) -> Self {
        let start = |panel: PanelId| {
            config
                .start_path(panel)
                .cloned()
                .unwrap_or_else(settings::default_start_dir)
        };
        let left = start(PanelId::Left);
        let right = start(PanelId::Right);
        info!(left = %left.display(), right = %right.display(), "Opening panels");

        Self {
            commander: Commander::new(LocalFileSystem, left, right),
            executor: OperationExecutor::new(),
            operation_rx: None,
            theme: Theme::dark(),
            backend: config.backend,
            poll_interval: config.poll_interval(),
            needs_redraw: true,
            last_size: None,
            should_quit: false,
        }
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let poller = spawn_input(self.backend, self.poll_interval, input_tx)?;

        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.last_size = Some(terminal.size()?);
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(edges) = input_rx.recv() => {
                    self.handle_edges(edges);
                }

                result = async {
                    if let Some(rx) = &mut self.operation_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    match result {
                        Some(result) => self.handle_operation_result(result),
                        None => {
                            self.operation_rx = None;
                            self.commander.abandon_operation();
                        }
                    }
                }

                _ = interval.tick() => {
                    // Input is read by the poll task, so resizes show up here.
                    if self.last_size != Some(terminal.size()?) {
                        self.needs_redraw = true;
                    }
                    if poller.is_finished() {
                        warn!("Controller poll task exited");
                        self.should_quit = true;
                    }
                }
            }

            if !self.commander.take_changes().is_empty() {
                self.needs_redraw = true;
            }
        }

        poller.stop();
        Ok(())
    }

    /// Dispatch one tick's edges and carry out the requested effects.
    fn handle_edges(&mut self, edges: ButtonSet) {
        for effect in self.commander.dispatch(edges) {
            match effect {
                Effect::Execute(operation) => {
                    self.operation_rx = Some(self.executor.run(operation));
                }
                Effect::Quit => {
                    info!("Quitting");
                    self.should_quit = true;
                }
            }
        }
    }

    fn handle_operation_result(&mut self, result: OperationResult) {
        match result {
            OperationResult::Progress(progress) => self.commander.update_progress(progress),
            OperationResult::Complete(complete) => {
                self.operation_rx = None;
                self.commander.finish_operation(complete);
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        render_app(&self.commander, &self.theme, frame.area(), frame.buffer_mut());
    }
}

/// Start the poll task for the configured backend.
fn spawn_input(
    backend: InputBackend,
    period: Duration,
    sender: mpsc::UnboundedSender<ButtonSet>,
) -> std::io::Result<PollerHandle> {
    match backend {
        InputBackend::Keyboard => spawn_poller(KeyboardPad::new, period, sender),
        #[cfg(feature = "sdl")]
        InputBackend::Sdl => spawn_poller(
            || -> Box<dyn handheld_input::GamepadSource> {
                // The keyboard keeps working next to the controller.
                match handheld_input::SdlPad::new() {
                    Ok(pad) => Box::new(handheld_input::MergedPad::new(pad, KeyboardPad::new())),
                    Err(e) => {
                        warn!("SDL unavailable, using keyboard: {e}");
                        Box::new(KeyboardPad::new())
                    }
                }
            },
            period,
            sender,
        ),
        #[cfg(not(feature = "sdl"))]
        InputBackend::Sdl => {
            warn!("Built without the sdl feature, using keyboard");
            spawn_poller(KeyboardPad::new, period, sender)
        }
    }
}
