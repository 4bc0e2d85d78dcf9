//! File operation types.

use std::path::{Path, PathBuf};

use handheld_core::FileEntry;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Which transfer to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum OperationKind {
    Copy,
    Move,
}

impl OperationKind {
    /// Verb for completion messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
        }
    }
}

/// A captured Copy/Move request waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// The entry to transfer.
    pub source: FileEntry,
    /// Directory that receives the entry.
    pub destination: PathBuf,
    /// Copy or move.
    pub kind: OperationKind,
}

impl PendingOperation {
    pub fn new(source: FileEntry, destination: impl Into<PathBuf>, kind: OperationKind) -> Self {
        Self {
            source,
            destination: destination.into(),
            kind,
        }
    }

    /// Create a copy operation.
    pub fn copy(source: FileEntry, destination: impl Into<PathBuf>) -> Self {
        Self::new(source, destination, OperationKind::Copy)
    }

    /// Create a move operation.
    pub fn move_to(source: FileEntry, destination: impl Into<PathBuf>) -> Self {
        Self::new(source, destination, OperationKind::Move)
    }

    /// Question shown in the confirmation dialog.
    pub fn confirmation_message(&self) -> String {
        format!(
            "{} '{}' to {}?",
            self.kind,
            self.source.name,
            self.destination.display()
        )
    }
}

/// An error that aborted a file operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// I/O failure on a specific path.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source and destination resolve to the same entry.
    #[error("Source and destination are the same: {path}")]
    SameFile { path: PathBuf },

    /// A directory would be copied into its own subtree.
    #[error("Cannot place {directory} inside itself ({destination})")]
    SourceIsAncestor {
        directory: PathBuf,
        destination: PathBuf,
    },

    /// The source has no final path component (e.g. a filesystem root).
    #[error("Path has no file name: {path}")]
    NoFileName { path: PathBuf },

    /// The worker went away without reporting a result.
    #[error("Stopped before finishing: {path}")]
    Interrupted { path: PathBuf },
}

impl OperationError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::SameFile { path }
            | Self::NoFileName { path }
            | Self::Interrupted { path } => path,
            Self::SourceIsAncestor { directory, .. } => directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_message() {
        let op = PendingOperation::move_to(FileEntry::file("/docs/notes.txt"), "/backup");
        assert_eq!(op.confirmation_message(), "Move 'notes.txt' to /backup?");
        assert_eq!(op.kind.past_tense(), "Moved");
    }

    #[test]
    fn test_error_path() {
        let err = OperationError::io(
            "/docs/notes.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.path(), Path::new("/docs/notes.txt"));
        assert!(err.to_string().starts_with("/docs/notes.txt: "));
    }
}
