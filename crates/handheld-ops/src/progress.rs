//! Progress and completion reporting for file operations.

use std::path::{Path, PathBuf};

use crate::{OperationError, OperationKind, PendingOperation};

/// Totals of what an operation transferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Files written at the destination.
    pub files: usize,
    /// Directories created or merged at the destination.
    pub directories: usize,
    /// Bytes written.
    pub bytes: u64,
}

/// Progress information for an ongoing operation.
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// The type of operation.
    pub kind: OperationKind,
    /// Number of files completed.
    pub files_completed: usize,
    /// Number of bytes processed so far.
    pub bytes_processed: u64,
    /// The file most recently processed.
    pub current_file: Option<PathBuf>,
}

impl OperationProgress {
    /// Create a new progress tracker for an operation.
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            files_completed: 0,
            bytes_processed: 0,
            current_file: None,
        }
    }

    /// Record the file that was just transferred.
    pub fn update(&mut self, file: &Path, stats: &TransferStats) {
        self.files_completed = stats.files;
        self.bytes_processed = stats.bytes;
        self.current_file = Some(file.to_path_buf());
    }
}

/// Final report of an operation.
#[derive(Debug)]
pub struct OperationComplete {
    /// The operation that ran.
    pub operation: PendingOperation,
    /// What was transferred, or the error that aborted it.
    pub outcome: Result<TransferStats, OperationError>,
}

impl OperationComplete {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
