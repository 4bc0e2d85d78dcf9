//! Recursive copy.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{OperationError, ProgressFn, TransferStats};

/// Copy a file or directory into `dest_dir`, overwriting existing files.
pub fn copy_entry(source: &Path, dest_dir: &Path) -> Result<TransferStats, OperationError> {
    copy_entry_with_progress(source, dest_dir, &mut |_, _| {})
}

/// Copy a file or directory into `dest_dir`, reporting every file copied.
///
/// Directories are recreated depth-first and merged into existing ones.
/// The copy stops at the first failure; entries already written stay in
/// place.
pub fn copy_entry_with_progress(
    source: &Path,
    dest_dir: &Path,
    on_file: &mut ProgressFn<'_>,
) -> Result<TransferStats, OperationError> {
    let target = target_path(source, dest_dir)?;
    check_paths(source, &target)?;

    let mut stats = TransferStats::default();
    let metadata = fs::metadata(source).map_err(|e| OperationError::io(source, e))?;
    if metadata.is_dir() {
        copy_dir_recursive(source, &target, &mut stats, on_file)?;
    } else {
        copy_file(source, &target, &mut stats, on_file)?;
    }
    Ok(stats)
}

/// Path the entry will have inside `dest_dir`.
pub(crate) fn target_path(source: &Path, dest_dir: &Path) -> Result<PathBuf, OperationError> {
    let name = source.file_name().ok_or_else(|| OperationError::NoFileName {
        path: source.to_path_buf(),
    })?;
    Ok(dest_dir.join(name))
}

/// Reject transfers onto the source itself or into its own subtree.
pub(crate) fn check_paths(source: &Path, target: &Path) -> Result<(), OperationError> {
    let source = resolve(source);
    let target = resolve(target);

    if source == target {
        return Err(OperationError::SameFile { path: source });
    }
    if source.is_dir() && target.starts_with(&source) {
        return Err(OperationError::SourceIsAncestor {
            directory: source,
            destination: target,
        });
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Copy a single file.
pub(crate) fn copy_file(
    source: &Path,
    dest: &Path,
    stats: &mut TransferStats,
    on_file: &mut ProgressFn<'_>,
) -> Result<(), OperationError> {
    let bytes = fs::copy(source, dest).map_err(|e| OperationError::io(source, e))?;
    stats.files += 1;
    stats.bytes += bytes;
    on_file(source, stats);
    Ok(())
}

/// Recursively copy a directory.
pub(crate) fn copy_dir_recursive(
    source: &Path,
    dest: &Path,
    stats: &mut TransferStats,
    on_file: &mut ProgressFn<'_>,
) -> Result<(), OperationError> {
    fs::create_dir_all(dest).map_err(|e| OperationError::io(dest, e))?;
    stats.directories += 1;

    let entries = fs::read_dir(source).map_err(|e| OperationError::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| OperationError::io(source, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if path.is_dir() {
            copy_dir_recursive(&path, &dest_path, stats, on_file)?;
        } else {
            copy_file(&path, &dest_path, stats, on_file)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src_dir = tmp.path().join("src");
        let dst_dir = tmp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();
        fs::write(src_dir.join("a.txt"), "new contents").unwrap();
        fs::write(dst_dir.join("a.txt"), "old").unwrap();

        let stats = copy_entry(&src_dir.join("a.txt"), &dst_dir).unwrap();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.bytes, 12);
        assert_eq!(fs::read_to_string(dst_dir.join("a.txt")).unwrap(), "new contents");
        assert!(src_dir.join("a.txt").exists());
    }

    #[test]
    fn test_copy_onto_itself_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "x").unwrap();

        let err = copy_entry(&tmp.path().join("a.txt"), tmp.path()).unwrap_err();

        assert!(matches!(err, OperationError::SameFile { .. }));
        assert_eq!(fs::read_to_string(tmp.path().join("a.txt")).unwrap(), "x");
    }

    #[test]
    fn test_copy_into_own_subtree_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dir");
        fs::create_dir_all(dir.join("inner")).unwrap();

        let err = copy_entry(&dir, &dir.join("inner")).unwrap_err();

        assert!(matches!(err, OperationError::SourceIsAncestor { .. }));
        assert!(!dir.join("inner").join("dir").exists());
    }

    #[test]
    fn test_progress_callback_sees_every_file() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("tree");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("one"), "1").unwrap();
        fs::write(src.join("sub").join("two"), "22").unwrap();
        let dst = tmp.path().join("out");
        fs::create_dir_all(&dst).unwrap();

        let mut seen = Vec::new();
        let stats = copy_entry_with_progress(&src, &dst, &mut |path, stats| {
            seen.push((path.file_name().unwrap().to_owned(), stats.files));
        })
        .unwrap();

        assert_eq!(stats.files, 2);
        assert_eq!(stats.directories, 2);
        assert_eq!(stats.bytes, 3);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen.last().map(|(_, n)| *n), Some(2));
    }
}
