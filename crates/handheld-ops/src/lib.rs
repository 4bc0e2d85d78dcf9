//! Filesystem access and file operations for handheld-commander.
//!
//! This crate provides the directory listing provider used by the panels and
//! the copy/move engine that runs confirmed operations on a blocking task,
//! reporting progress and completion over a channel.

mod copy;
mod executor;
mod move_op;
mod operation;
mod progress;
mod provider;

pub use copy::{copy_entry, copy_entry_with_progress};
pub use executor::{OperationExecutor, OperationResult};
pub use move_op::{move_entry, move_entry_with_progress};
pub use operation::{OperationError, OperationKind, PendingOperation};
pub use progress::{OperationComplete, OperationProgress, TransferStats};
pub use provider::{FileSystemProvider, LocalFileSystem};

/// Default channel buffer size for operation progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;

/// Callback invoked after every file transferred.
pub type ProgressFn<'a> = dyn FnMut(&std::path::Path, &TransferStats) + 'a;
