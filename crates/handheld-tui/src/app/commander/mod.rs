//! The input dispatch state machine.
//!
//! [`Commander`] owns both panels, the modal stack and the parked
//! confirmation. Every fired edge set goes through [`Commander::dispatch`],
//! which hands it to exactly one layer. Handlers mutate their own state and
//! return a [`Transition`]; anything that has to happen outside the state
//! machine comes back to the caller as an [`Effect`].

use std::path::{Path, PathBuf};

use handheld_core::{Button, ButtonSet, CommanderError, Direction, EntryKind, PanelId};
use handheld_ops::{
    FileSystemProvider, OperationComplete, OperationError, OperationKind, OperationProgress,
    PendingOperation, TransferStats,
};
use tracing::{debug, info, warn};

use super::confirm::{ConfirmationWorkflow, Dialog, DialogInput, Resumed};
use super::layer::{LayerId, ModalStack, Overlay, Transition};
use super::menu::{ContextAction, ContextMenu, MenuInput, PopupMenu};
use super::panel::{PanelLocation, PanelState};
use super::state::{Change, Effect, StatusMessage};
use crate::ui::format_size;

mod navigation;

/// What runs once a confirmation dialog is answered with OK.
#[derive(Debug)]
enum Continuation {
    Run(PendingOperation),
    Quit,
}

/// Dual-pane state plus the modal layers driven by controller edges.
#[derive(Debug)]
pub struct Commander<P> {
    provider: P,
    panels: [PanelState; 2],
    active: PanelId,
    modals: ModalStack,
    confirmation: ConfirmationWorkflow<Continuation>,
    in_flight: Option<PendingOperation>,
    progress: Option<OperationProgress>,
    status: Option<StatusMessage>,
    changes: Vec<Change>,
}

impl<P: FileSystemProvider> Commander<P> {
    /// Open both panels. A start directory that cannot be listed falls back
    /// to its nearest listable ancestor, then to the drive view.
    pub fn new(provider: P, left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        let mut commander = Self {
            provider,
            panels: [PanelState::new(), PanelState::new()],
            active: PanelId::Left,
            modals: ModalStack::new(),
            confirmation: ConfirmationWorkflow::new(),
            in_flight: None,
            progress: None,
            status: None,
            changes: Vec::new(),
        };
        commander.open_or_fall_back(PanelId::Left, absolute_start(left.into()));
        commander.open_or_fall_back(PanelId::Right, absolute_start(right.into()));
        commander
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn panel(&self, panel: PanelId) -> &PanelState {
        &self.panels[panel.index()]
    }

    fn panel_mut(&mut self, panel: PanelId) -> &mut PanelState {
        &mut self.panels[panel.index()]
    }

    pub fn active_panel(&self) -> PanelId {
        self.active
    }

    /// The layer that receives the next edge.
    pub fn active_layer(&self) -> LayerId {
        self.modals.active()
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    /// Whether a confirmation is waiting for its answer.
    pub fn awaiting_confirmation(&self) -> bool {
        self.confirmation.is_pending()
    }

    /// The confirmed operation currently running, if any.
    pub fn in_flight(&self) -> Option<&PendingOperation> {
        self.in_flight.as_ref()
    }

    pub fn progress(&self) -> Option<&OperationProgress> {
        self.progress.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Drain the change notifications recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    /// Route one tick's fired edges to the highest-priority open layer.
    ///
    /// Buttons are handled in declaration order. Once the handling layer asks
    /// for a layer change, the rest of the set is dropped.
    pub fn dispatch(&mut self, edges: ButtonSet) -> Vec<Effect> {
        let mut effects = Vec::new();
        if edges.contains(Button::Start) && edges.contains(Button::Select) {
            info!("Quit chord pressed");
            effects.push(Effect::Quit);
            return effects;
        }

        let layer = self.modals.active();
        debug!(%layer, %edges, "Dispatching edges");

        for button in edges.iter() {
            let transition = match layer {
                LayerId::Navigation => self.navigation_edge(button),
                LayerId::ContextMenu => self.context_edge(button),
                LayerId::PopupMenu => self.popup_edge(button),
                LayerId::Dialog => self.dialog_edge(button),
            };
            if matches!(transition, Transition::Stay) {
                continue;
            }
            if self.modals.apply(layer, transition) {
                self.record(Change::Layer);
            }
            self.resume_confirmation(&mut effects);
            break;
        }

        effects
    }

    /// Record progress of the running operation.
    pub fn update_progress(&mut self, progress: OperationProgress) {
        self.progress = Some(progress);
        self.record(Change::Progress);
    }

    /// Apply the result of the running operation and refresh both panels.
    pub fn finish_operation(&mut self, complete: OperationComplete) {
        let OperationComplete { operation, outcome } = complete;
        self.in_flight = None;
        if self.progress.take().is_some() {
            self.record(Change::Progress);
        }

        self.refresh();

        match outcome {
            Ok(stats) => {
                self.set_status(StatusMessage::success(completion_message(&operation, &stats)));
            }
            Err(err) => {
                warn!(kind = %operation.kind, error = %err, "Operation failed");
                let message = format!("{} failed: {err}", operation.kind);
                if self.modals.is_open(LayerId::Dialog) {
                    self.set_status(StatusMessage::error(message));
                } else {
                    self.open_overlay(Overlay::Dialog(Dialog::info(message)));
                }
            }
        }
    }

    /// The running operation's results stopped without a completion.
    pub fn abandon_operation(&mut self) {
        let Some(operation) = self.in_flight.clone() else {
            return;
        };
        warn!(kind = %operation.kind, source = %operation.source.path.display(), "Operation ended without a result");
        let outcome = Err(OperationError::Interrupted {
            path: operation.source.path.clone(),
        });
        self.finish_operation(OperationComplete { operation, outcome });
    }

    fn record(&mut self, change: Change) {
        if !self.changes.contains(&change) {
            self.changes.push(change);
        }
    }

    fn set_status(&mut self, status: StatusMessage) {
        if self.status.as_ref() != Some(&status) {
            self.status = Some(status);
            self.record(Change::Status);
        }
    }

    fn open_overlay(&mut self, overlay: Overlay) {
        if self.modals.apply(LayerId::Navigation, Transition::Push(overlay)) {
            self.record(Change::Layer);
        }
    }

    fn navigation_edge(&mut self, button: Button) -> Transition {
        let active = self.active;
        let result = match button {
            Button::DPadUp => {
                self.move_selection(active, Direction::Up);
                Ok(())
            }
            Button::DPadDown => {
                self.move_selection(active, Direction::Down);
                Ok(())
            }
            Button::LeftShoulder => {
                self.switch_active_panel(PanelId::Left);
                Ok(())
            }
            Button::RightShoulder => {
                self.switch_active_panel(PanelId::Right);
                Ok(())
            }
            Button::A => self.activate(active),
            Button::B => self.navigate_up(active),
            Button::X => return self.popup_for_selection(),
            Button::Y => return Transition::Push(Overlay::ContextMenu(ContextMenu::new())),
            Button::Start => return self.confirm_quit(),
            _ => Ok(()),
        };
        result.map_or_else(|err| failure_dialog(&err), |()| Transition::Stay)
    }

    fn popup_for_selection(&self) -> Transition {
        let panel = self.panel(self.active);
        match panel.selected_entry() {
            Some(entry) if !entry.is_parent_marker() && entry.kind != EntryKind::Drive => {
                Transition::Push(Overlay::PopupMenu(PopupMenu::new(
                    self.active,
                    panel.selected(),
                    entry.path.clone(),
                )))
            }
            _ => Transition::Stay,
        }
    }

    fn confirm_quit(&mut self) -> Transition {
        let message = match &self.in_flight {
            Some(op) => format!("Quit? The running {} will be interrupted.", op.kind.to_string().to_lowercase()),
            None => "Quit?".to_string(),
        };
        match self.confirmation.open(message, Continuation::Quit) {
            Ok(dialog) => Transition::Push(Overlay::Dialog(dialog)),
            Err(_) => Transition::Stay,
        }
    }

    fn context_edge(&mut self, button: Button) -> Transition {
        let input = match self.modals.context_menu_mut() {
            Some(menu) => menu.menu.handle(button),
            None => return Transition::Stay,
        };
        match input {
            MenuInput::Ignored => Transition::Stay,
            MenuInput::Moved => {
                self.record(Change::Layer);
                Transition::Stay
            }
            MenuInput::Close => Transition::Close,
            MenuInput::Activate(action) => {
                let active = self.active;
                let result = match action {
                    ContextAction::Refresh => {
                        self.refresh();
                        Ok(())
                    }
                    ContextAction::ShowDrives => self.show_drives(active),
                    ContextAction::OpenInOtherPanel => self.open_in_other_panel(),
                };
                match result {
                    Ok(()) => Transition::Close,
                    Err(err) => match failure_dialog(&err) {
                        Transition::Push(overlay) => Transition::Replace(overlay),
                        other => other,
                    },
                }
            }
        }
    }

    fn popup_edge(&mut self, button: Button) -> Transition {
        let (input, target_panel, target_index, target_path) = match self.modals.popup_menu_mut() {
            Some(popup) => (
                popup.menu.handle(button),
                popup.target_panel,
                popup.target_index,
                popup.target_path.clone(),
            ),
            None => return Transition::Stay,
        };
        match input {
            MenuInput::Ignored => Transition::Stay,
            MenuInput::Moved => {
                self.record(Change::Layer);
                Transition::Stay
            }
            MenuInput::Close => Transition::Close,
            MenuInput::Activate(action) => match action.operation_kind() {
                Some(kind) => {
                    self.request_operation(kind, target_panel, target_index, &target_path)
                }
                None => {
                    debug!(%action, "Reserved menu entry");
                    Transition::Stay
                }
            },
        }
    }

    /// Turn a Copy/Move choice into a confirmation dialog.
    fn request_operation(
        &mut self,
        kind: OperationKind,
        target_panel: PanelId,
        target_index: usize,
        target_path: &Path,
    ) -> Transition {
        let Some(source) = self
            .panel(target_panel)
            .entry(target_index)
            .filter(|entry| !entry.is_parent_marker() && entry.path == target_path)
            .cloned()
        else {
            debug!(%target_panel, target_index, path = %target_path.display(), "Menu target no longer listed");
            return Transition::Close;
        };

        if let Some(running) = &self.in_flight {
            return Transition::Replace(Overlay::Dialog(Dialog::info(format!(
                "Wait for the running {} of '{}' to finish.",
                running.kind.to_string().to_lowercase(),
                running.source.name
            ))));
        }

        let Some(destination) = self
            .panel(target_panel.opposite())
            .location()
            .directory()
            .map(Path::to_path_buf)
        else {
            return Transition::Replace(Overlay::Dialog(Dialog::info(
                "Open a destination directory in the other panel first.",
            )));
        };

        let operation = PendingOperation::new(source, destination, kind);
        let message = operation.confirmation_message();
        match self.confirmation.open(message, Continuation::Run(operation)) {
            Ok(dialog) => Transition::Replace(Overlay::Dialog(dialog)),
            Err(_) => {
                warn!("A confirmation is already pending");
                Transition::Close
            }
        }
    }

    fn dialog_edge(&mut self, button: Button) -> Transition {
        match self.modals.dialog_mut().map(|dialog| dialog.handle(button)) {
            Some(DialogInput::Closed) => Transition::Close,
            Some(DialogInput::Ignored) | None => Transition::Stay,
        }
    }

    /// Continue whatever the last answered confirmation was guarding.
    fn resume_confirmation(&mut self, effects: &mut Vec<Effect>) {
        match self.confirmation.resume() {
            Resumed::Idle | Resumed::Waiting => {}
            Resumed::Confirmed(Continuation::Run(operation)) => {
                self.start_operation(operation, effects);
            }
            Resumed::Confirmed(Continuation::Quit) => effects.push(Effect::Quit),
            Resumed::Declined(Continuation::Run(operation)) => {
                debug!(kind = %operation.kind, source = %operation.source.name, "Operation cancelled");
                self.set_status(StatusMessage::info(format!("{} cancelled", operation.kind)));
            }
            Resumed::Declined(Continuation::Quit) => {}
        }
    }

    fn start_operation(&mut self, operation: PendingOperation, effects: &mut Vec<Effect>) {
        info!(
            kind = %operation.kind,
            source = %operation.source.path.display(),
            destination = %operation.destination.display(),
            "Operation confirmed"
        );
        self.progress = Some(OperationProgress::new(operation.kind));
        self.record(Change::Progress);
        self.set_status(StatusMessage::info(format!(
            "{} {}…",
            operation.kind,
            operation.source.name
        )));
        self.in_flight = Some(operation.clone());
        effects.push(Effect::Execute(operation));
    }

    fn open_or_fall_back(&mut self, panel: PanelId, start: PathBuf) {
        let location = PanelLocation::Directory(start.clone());
        if let Err(err) = self.change_location(panel, location) {
            warn!(%panel, path = %start.display(), error = %err, "Start directory unavailable");
            self.fall_back(panel, &start);
        }
    }

    /// Move `panel` to the nearest listable ancestor of `path`, or the drive view.
    fn fall_back(&mut self, panel: PanelId, path: &Path) {
        let mut candidate = self.provider.parent_of(path);
        while let Some(dir) = candidate {
            if self
                .change_location(panel, PanelLocation::Directory(dir.clone()))
                .is_ok()
            {
                self.panel_mut(panel).select_path(path);
                return;
            }
            candidate = self.provider.parent_of(&dir);
        }
        if let Err(err) = self.change_location(panel, PanelLocation::Drives) {
            warn!(%panel, error = %err, "Drive view unavailable");
        }
    }

    /// Make `location` current for `panel`. On failure nothing changes.
    fn change_location(
        &mut self,
        panel: PanelId,
        location: PanelLocation,
    ) -> Result<(), CommanderError> {
        let state = &mut self.panels[panel.index()];
        state.load(&self.provider, location)?;
        debug!(%panel, location = ?state.location(), "Panel moved");
        self.record(Change::Location(panel));
        self.record(Change::Entries(panel));
        self.record(Change::Selection(panel));
        Ok(())
    }
}

/// Resolve a start directory against the working directory so every listed
/// path, parent markers included, is absolute.
fn absolute_start(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    path.canonicalize()
        .or_else(|_| std::path::absolute(&path))
        .unwrap_or(path)
}

fn failure_dialog(err: &CommanderError) -> Transition {
    warn!(error = %err, "Listing failed");
    Transition::Push(Overlay::Dialog(Dialog::info(err.to_string())))
}

/// Status line text for a finished operation.
fn completion_message(operation: &PendingOperation, stats: &TransferStats) -> String {
    let files = match stats.files {
        1 => "1 file".to_string(),
        n => format!("{n} files"),
    };
    format!(
        "{} {} → {} ({files}, {})",
        operation.kind.past_tense(),
        operation.source.name,
        operation.destination.display(),
        format_size(stats.bytes)
    )
}
