//! Per-panel listing and selection.

use std::path::{Component, Path, PathBuf};

use handheld_core::{CommanderError, Direction, FileEntry};
use handheld_ops::FileSystemProvider;

use super::constants::DRIVES_TITLE;

/// What a panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelLocation {
    /// A directory listing.
    Directory(PathBuf),
    /// The synthetic list of filesystem roots.
    Drives,
}

impl PanelLocation {
    /// The directory, unless this is the drive view.
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(path) => Some(path),
            Self::Drives => None,
        }
    }

    pub fn is_drives(&self) -> bool {
        matches!(self, Self::Drives)
    }
}

/// One panel: where it is, what it lists, and which row is selected.
///
/// The selection satisfies `selected < entries.len()` whenever the list is
/// non-empty and is 0 otherwise.
#[derive(Debug, Clone)]
pub struct PanelState {
    location: PanelLocation,
    entries: Vec<FileEntry>,
    selected: usize,
}

impl PanelState {
    /// An empty panel in the drive view; call [`PanelState::load`] to fill it.
    pub fn new() -> Self {
        Self {
            location: PanelLocation::Drives,
            entries: Vec::new(),
            selected: 0,
        }
    }

    pub fn location(&self) -> &PanelLocation {
        &self.location
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    pub fn entry(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// List `location` and make it current. On failure nothing changes.
    pub fn load<P: FileSystemProvider + ?Sized>(
        &mut self,
        provider: &P,
        location: PanelLocation,
    ) -> Result<(), CommanderError> {
        self.entries = list(provider, &location)?;
        self.location = location;
        self.selected = 0;
        Ok(())
    }

    /// Re-list the current location in place, keeping the selection clamped.
    ///
    /// Returns whether the listing changed.
    pub fn reload<P: FileSystemProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<bool, CommanderError> {
        let entries = list(provider, &self.location)?;
        let changed = entries != self.entries;
        self.entries = entries;
        self.clamp_selection();
        Ok(changed)
    }

    /// Move the selection one row; a no-op at either end.
    ///
    /// Returns whether the selection moved.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => self.selected.checked_sub(1),
            Direction::Down => Some(self.selected + 1).filter(|&i| i < self.entries.len()),
        };
        match target {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Select the entry whose path is `path`, if listed.
    pub fn select_path(&mut self, path: &Path) -> bool {
        match self
            .entries
            .iter()
            .position(|e| !e.is_parent_marker() && e.path == path)
        {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Path segments for the panel title.
    pub fn breadcrumbs(&self) -> Vec<String> {
        match &self.location {
            PanelLocation::Drives => vec![DRIVES_TITLE.to_string()],
            PanelLocation::Directory(path) => breadcrumbs(path),
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

fn list<P: FileSystemProvider + ?Sized>(
    provider: &P,
    location: &PanelLocation,
) -> Result<Vec<FileEntry>, CommanderError> {
    match location {
        PanelLocation::Directory(path) => provider.list_entries(path),
        PanelLocation::Drives => Ok(provider
            .list_roots()
            .into_iter()
            .map(FileEntry::drive)
            .collect()),
    }
}

/// Root followed by each normal component.
fn breadcrumbs(path: &Path) -> Vec<String> {
    let mut segments = Vec::new();
    let mut root = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => root.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => root.push(std::path::MAIN_SEPARATOR),
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
            Component::CurDir | Component::ParentDir => {}
        }
    }
    if !root.is_empty() {
        segments.insert(0, root);
    }
    segments
}
