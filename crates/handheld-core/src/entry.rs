//! Directory entries as shown in a panel.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the synthetic entry that leads to the parent directory.
pub const PARENT_MARKER: &str = "..";

/// What a listed entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// The `..` entry at the top of every non-root listing.
    Parent,
    Directory,
    File,
    /// A filesystem root in the synthetic drive view.
    Drive,
}

impl EntryKind {
    /// Glyph rendered in front of the entry name.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Parent | Self::Directory => "📁",
            Self::File => "📄",
            Self::Drive => "💾",
        }
    }
}

/// A single row of a panel listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display name.
    pub name: String,
    /// Absolute path the entry refers to.
    pub path: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
}

impl FileEntry {
    /// Create the parent marker pointing at `parent`.
    pub fn parent(parent: impl Into<PathBuf>) -> Self {
        Self {
            name: PARENT_MARKER.to_string(),
            path: parent.into(),
            kind: EntryKind::Parent,
        }
    }

    /// Create a directory entry.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: EntryKind::Directory,
        }
    }

    /// Create a file entry.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: EntryKind::File,
        }
    }

    /// Create a drive entry for a filesystem root.
    pub fn drive(root: impl Into<PathBuf>) -> Self {
        let path = root.into();
        Self {
            name: path.display().to_string(),
            path,
            kind: EntryKind::Drive,
        }
    }

    /// Whether activating the entry enters a directory.
    pub fn is_directory(&self) -> bool {
        !matches!(self.kind, EntryKind::File)
    }

    pub fn is_parent_marker(&self) -> bool {
        self.kind == EntryKind::Parent
    }

    pub fn glyph(&self) -> &'static str {
        self.kind.glyph()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_names() {
        let dir = FileEntry::directory("/docs/photos");
        assert_eq!(dir.name, "photos");
        assert!(dir.is_directory());

        let file = FileEntry::file("/docs/notes.txt");
        assert_eq!(file.name, "notes.txt");
        assert!(!file.is_directory());
        assert_eq!(file.glyph(), "📄");
    }

    #[test]
    fn test_parent_marker() {
        let parent = FileEntry::parent("/");
        assert_eq!(parent.name, PARENT_MARKER);
        assert!(parent.is_parent_marker());
        assert!(parent.is_directory());
    }

    #[test]
    fn test_drive_uses_full_root_as_name() {
        let drive = FileEntry::drive("/");
        assert_eq!(drive.name, "/");
        assert_eq!(drive.glyph(), "💾");
    }
}
