//! Dialogs and the confirmation handshake.
//!
//! Opening a confirmation parks the caller's continuation next to the
//! receiving half of a oneshot channel; the dialog owns the sending half.
//! A later A or B edge routed to the dialog sends the answer, and the owner
//! resumes the parked continuation by polling the receiver. Nothing blocks.

use handheld_core::Button;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// What the dialog asks or tells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// OK/Cancel question.
    Confirmation(String),
    /// Message acknowledged with A or B.
    Info(String),
}

/// What a dialog did with one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    Ignored,
    /// The dialog was answered and should close.
    Closed,
}

/// A modal dialog. Confirmation dialogs carry the slot their answer goes to.
#[derive(Debug)]
pub struct Dialog {
    kind: DialogKind,
    result_slot: Option<oneshot::Sender<bool>>,
}

impl Dialog {
    /// An informational dialog with no answer slot.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info(message.into()),
            result_slot: None,
        }
    }

    fn confirmation(message: String, result_slot: oneshot::Sender<bool>) -> Self {
        Self {
            kind: DialogKind::Confirmation(message),
            result_slot: Some(result_slot),
        }
    }

    pub fn kind(&self) -> &DialogKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        match &self.kind {
            DialogKind::Confirmation(message) | DialogKind::Info(message) => message,
        }
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self.kind, DialogKind::Confirmation(_))
    }

    /// Deliver `answer`. Only the first call has an effect.
    pub fn resolve(&mut self, answer: bool) -> bool {
        match self.result_slot.take() {
            Some(slot) => slot.send(answer).is_ok(),
            None => false,
        }
    }

    /// A confirms, B cancels; every other button is ignored.
    pub fn handle(&mut self, button: Button) -> DialogInput {
        let answer = match button {
            Button::A => true,
            Button::B => false,
            _ => return DialogInput::Ignored,
        };
        if self.is_confirmation() {
            self.resolve(answer);
        }
        DialogInput::Closed
    }
}

/// Outcome of resuming a parked confirmation.
#[derive(Debug, PartialEq, Eq)]
pub enum Resumed<T> {
    /// No confirmation is parked.
    Idle,
    /// The dialog has not been answered yet.
    Waiting,
    Confirmed(T),
    /// Cancelled, or the dialog went away unanswered.
    Declined(T),
}

/// A single in-flight yes/no request.
#[derive(Debug)]
pub struct ConfirmationWorkflow<T> {
    pending: Option<(oneshot::Receiver<bool>, T)>,
}

impl<T> ConfirmationWorkflow<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Park `continuation` and return the dialog that will answer it.
    ///
    /// Fails, handing the continuation back, while another request is parked.
    pub fn open(&mut self, message: impl Into<String>, continuation: T) -> Result<Dialog, T> {
        if self.pending.is_some() {
            return Err(continuation);
        }
        let (tx, rx) = oneshot::channel();
        self.pending = Some((rx, continuation));
        Ok(Dialog::confirmation(message.into(), tx))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the continuation once its dialog has been answered.
    pub fn resume(&mut self) -> Resumed<T> {
        let Some((mut receiver, continuation)) = self.pending.take() else {
            return Resumed::Idle;
        };
        match receiver.try_recv() {
            Ok(true) => Resumed::Confirmed(continuation),
            Ok(false) | Err(TryRecvError::Closed) => Resumed::Declined(continuation),
            Err(TryRecvError::Empty) => {
                self.pending = Some((receiver, continuation));
                Resumed::Waiting
            }
        }
    }
}

impl<T> Default for ConfirmationWorkflow<T> {
    fn default() -> Self {
        Self::new()
    }
}
