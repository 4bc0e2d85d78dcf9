//! Runs confirmed operations off the UI thread.

use tokio::sync::mpsc;

use crate::progress::{OperationComplete, OperationProgress};
use crate::{OPERATION_CHANNEL_SIZE, OperationKind, PendingOperation, copy_entry_with_progress, move_entry_with_progress};

/// Message sent while an operation runs.
#[derive(Debug)]
pub enum OperationResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation finished. Always the last message.
    Complete(OperationComplete),
}

/// Executor for copy and move operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationExecutor;

impl OperationExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Start `operation` on the blocking pool.
    ///
    /// The receiver yields any number of progress updates followed by exactly
    /// one completion. Must be called from within a tokio runtime.
    pub fn run(&self, operation: PendingOperation) -> mpsc::Receiver<OperationResult> {
        let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

        tokio::task::spawn_blocking(move || {
            let complete = Self::execute_with(operation, |progress| {
                // Progress is advisory; a full channel just drops the update.
                let _ = tx.try_send(OperationResult::Progress(progress.clone()));
            });
            if tx.blocking_send(OperationResult::Complete(complete)).is_err() {
                tracing::warn!("operation finished after its receiver was dropped");
            }
        });

        rx
    }

    /// Run `operation` on the current thread.
    pub fn execute(&self, operation: PendingOperation) -> OperationComplete {
        Self::execute_with(operation, |_| {})
    }

    fn execute_with(
        operation: PendingOperation,
        mut report: impl FnMut(&OperationProgress),
    ) -> OperationComplete {
        let source = operation.source.path.clone();
        let destination = operation.destination.clone();
        tracing::info!(
            kind = %operation.kind,
            source = %source.display(),
            destination = %destination.display(),
            "starting operation"
        );

        let mut progress = OperationProgress::new(operation.kind);
        let mut on_file = |file: &std::path::Path, stats: &crate::TransferStats| {
            progress.update(file, stats);
            report(&progress);
        };

        let outcome = match operation.kind {
            OperationKind::Copy => copy_entry_with_progress(&source, &destination, &mut on_file),
            OperationKind::Move => move_entry_with_progress(&source, &destination, &mut on_file),
        };

        match &outcome {
            Ok(stats) => tracing::info!(
                kind = %operation.kind,
                files = stats.files,
                bytes = stats.bytes,
                "operation finished"
            ),
            Err(e) => tracing::error!(kind = %operation.kind, error = %e, "operation failed"),
        }

        OperationComplete { operation, outcome }
    }
}
