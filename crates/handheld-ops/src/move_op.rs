//! Move: rename when possible, otherwise copy then delete.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::copy::{check_paths, copy_dir_recursive, copy_file, target_path};
use crate::{OperationError, ProgressFn, TransferStats};

/// Move a file or directory into `dest_dir`.
pub fn move_entry(source: &Path, dest_dir: &Path) -> Result<TransferStats, OperationError> {
    move_entry_with_progress(source, dest_dir, &mut |_, _| {})
}

/// Move a file or directory into `dest_dir`, reporting every file written.
///
/// Directories are copied recursively and the source tree is removed only
/// after the whole copy succeeded. Files are renamed, falling back to
/// copy-and-delete across filesystems.
pub fn move_entry_with_progress(
    source: &Path,
    dest_dir: &Path,
    on_file: &mut ProgressFn<'_>,
) -> Result<TransferStats, OperationError> {
    let target = target_path(source, dest_dir)?;
    check_paths(source, &target)?;

    let metadata = fs::metadata(source).map_err(|e| OperationError::io(source, e))?;
    let mut stats = TransferStats::default();

    if metadata.is_dir() {
        copy_dir_recursive(source, &target, &mut stats, on_file)?;
        fs::remove_dir_all(source).map_err(|e| OperationError::io(source, e))?;
        return Ok(stats);
    }

    match fs::rename(source, &target) {
        Ok(()) => {
            stats.files = 1;
            stats.bytes = metadata.len();
            on_file(&target, &stats);
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(path = %source.display(), "rename crosses devices, copying");
            copy_file(source, &target, &mut stats, on_file)?;
            fs::remove_file(source).map_err(|e| OperationError::io(source, e))?;
        }
        Err(e) => return Err(OperationError::io(source, e)),
    }

    Ok(stats)
}
