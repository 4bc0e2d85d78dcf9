//! Directory listing and file opening.

use std::fs;
use std::path::{Path, PathBuf};

use handheld_core::{CommanderError, FileEntry};

/// Filesystem access used by the panels.
pub trait FileSystemProvider {
    /// List `path`: the parent marker first when `path` has a parent, then
    /// directories, then files, each group in native enumeration order.
    fn list_entries(&self, path: &Path) -> Result<Vec<FileEntry>, CommanderError>;

    /// Parent directory, or `None` at a filesystem root.
    fn parent_of(&self, path: &Path) -> Option<PathBuf>;

    /// Filesystem roots shown in the drive view.
    fn list_roots(&self) -> Vec<PathBuf>;

    /// Hand `path` to the OS default application.
    fn open_with_default_handler(&self, path: &Path) -> Result<(), CommanderError>;
}

impl<P: FileSystemProvider + ?Sized> FileSystemProvider for &P {
    fn list_entries(&self, path: &Path) -> Result<Vec<FileEntry>, CommanderError> {
        (**self).list_entries(path)
    }

    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        (**self).parent_of(path)
    }

    fn list_roots(&self) -> Vec<PathBuf> {
        (**self).list_roots()
    }

    fn open_with_default_handler(&self, path: &Path) -> Result<(), CommanderError> {
        (**self).open_with_default_handler(path)
    }
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystemProvider for LocalFileSystem {
    fn list_entries(&self, path: &Path) -> Result<Vec<FileEntry>, CommanderError> {
        let metadata = fs::metadata(path).map_err(|e| CommanderError::io(path, e))?;
        if !metadata.is_dir() {
            return Err(CommanderError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let mut directories = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| CommanderError::io(path, e))? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let entry_path = entry.path();
            if entry_path.is_dir() {
                directories.push(FileEntry::directory(entry_path));
            } else {
                files.push(FileEntry::file(entry_path));
            }
        }

        let mut entries = Vec::with_capacity(directories.len() + files.len() + 1);
        if let Some(parent) = self.parent_of(path) {
            entries.push(FileEntry::parent(parent));
        }
        entries.extend(directories);
        entries.extend(files);
        Ok(entries)
    }

    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        // `Path::parent` yields "" for a single relative component.
        path.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    #[cfg(windows)]
    fn list_roots(&self) -> Vec<PathBuf> {
        (b'A'..=b'Z')
            .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
            .filter(|root| root.exists())
            .collect()
    }

    #[cfg(not(windows))]
    fn list_roots(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("/")]
    }

    fn open_with_default_handler(&self, path: &Path) -> Result<(), CommanderError> {
        open::that(path).map_err(|e| CommanderError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handheld_core::EntryKind;
    use tempfile::TempDir;

    #[test]
    fn test_list_groups_directories_before_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "n").unwrap();
        fs::create_dir(tmp.path().join("photos")).unwrap();
        fs::write(tmp.path().join("todo.md"), "t").unwrap();

        let entries = LocalFileSystem.list_entries(tmp.path()).unwrap();

        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_parent_marker());
        assert_eq!(entries[0].path, tmp.path().parent().unwrap());
        assert_eq!(entries[1].name, "photos");
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert!(entries[2..].iter().all(|e| e.kind == EntryKind::File));
    }

    #[test]
    fn test_list_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFileSystem.list_entries(&tmp.path().join("gone")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let err = LocalFileSystem.list_entries(&file).unwrap_err();
        assert!(matches!(err, CommanderError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_root_has_no_parent() {
        assert_eq!(LocalFileSystem.parent_of(Path::new("/")), None);
        assert_eq!(LocalFileSystem.list_roots(), vec![PathBuf::from("/")]);
        let entries = LocalFileSystem.list_entries(Path::new("/")).unwrap();
        assert!(entries.iter().all(|e| !e.is_parent_marker()));
    }

    #[test]
    fn test_single_relative_component_has_no_parent() {
        assert_eq!(LocalFileSystem.parent_of(Path::new("docs")), None);
        assert_eq!(
            LocalFileSystem.parent_of(Path::new("docs/photos")),
            Some(PathBuf::from("docs"))
        );
    }
}
