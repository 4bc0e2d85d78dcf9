//! Panel navigation operations.

use handheld_core::{CommanderError, Direction, EntryKind, PanelId};
use handheld_ops::FileSystemProvider;
use tracing::{debug, warn};

use super::Commander;
use crate::app::panel::PanelLocation;
use crate::app::state::{Change, StatusMessage};

impl<P: FileSystemProvider> Commander<P> {
    /// Move a panel's selection one row, clamped at both ends.
    pub fn move_selection(&mut self, panel: PanelId, direction: Direction) -> bool {
        let moved = self.panel_mut(panel).move_selection(direction);
        if moved {
            self.record(Change::Selection(panel));
        }
        moved
    }

    /// Make `target` the active panel. A no-op if it already is.
    pub fn switch_active_panel(&mut self, target: PanelId) -> bool {
        if self.active == target {
            return false;
        }
        self.active = target;
        self.record(Change::ActivePanel);
        true
    }

    /// Enter the selected directory or drive, go up on the parent marker, or
    /// open a file with the default application.
    ///
    /// Failing to open a file is logged and reported on the status line; it
    /// leaves panel state untouched.
    pub fn activate(&mut self, panel: PanelId) -> Result<(), CommanderError> {
        let Some(entry) = self.panel(panel).selected_entry().cloned() else {
            return Ok(());
        };

        match entry.kind {
            EntryKind::Parent => self.navigate_up(panel),
            EntryKind::Directory | EntryKind::Drive => {
                self.change_location(panel, PanelLocation::Directory(entry.path))
            }
            EntryKind::File => {
                debug!(path = %entry.path.display(), "Opening file");
                if let Err(err) = self.provider.open_with_default_handler(&entry.path) {
                    warn!(path = %entry.path.display(), error = %err, "Cannot open file");
                    self.set_status(StatusMessage::error(err.to_string()));
                }
                Ok(())
            }
        }
    }

    /// Go to the parent directory, or to the drive view from a root.
    ///
    /// The directory just left is selected in the new listing. A no-op in
    /// the drive view.
    pub fn navigate_up(&mut self, panel: PanelId) -> Result<(), CommanderError> {
        let current = match self.panel(panel).location() {
            PanelLocation::Drives => return Ok(()),
            PanelLocation::Directory(path) => path.clone(),
        };

        let target = match self.provider.parent_of(&current) {
            Some(parent) => PanelLocation::Directory(parent),
            None => PanelLocation::Drives,
        };
        self.change_location(panel, target)?;
        self.panel_mut(panel).select_path(&current);
        Ok(())
    }

    /// Switch a panel to the synthetic drive view.
    pub fn show_drives(&mut self, panel: PanelId) -> Result<(), CommanderError> {
        if self.panel(panel).location().is_drives() {
            return Ok(());
        }
        self.change_location(panel, PanelLocation::Drives)
    }

    /// Show the active panel's location in the other panel too.
    pub fn open_in_other_panel(&mut self) -> Result<(), CommanderError> {
        let location = self.panel(self.active).location().clone();
        self.change_location(self.active.opposite(), location)
    }

    /// Re-list both panels.
    pub fn refresh(&mut self) {
        for panel in [PanelId::Left, PanelId::Right] {
            self.refresh_panel(panel);
        }
    }

    /// Re-list one panel, keeping the selection clamped. A directory that can
    /// no longer be listed gives way to its nearest listable ancestor.
    pub fn refresh_panel(&mut self, panel: PanelId) {
        let selected = self.panel(panel).selected();
        let state = &mut self.panels[panel.index()];
        match state.reload(&self.provider) {
            Ok(changed) => {
                if changed {
                    self.record(Change::Entries(panel));
                }
                if self.panel(panel).selected() != selected {
                    self.record(Change::Selection(panel));
                }
            }
            Err(err) => {
                let Some(dir) = self.panel(panel).location().directory().map(|d| d.to_path_buf())
                else {
                    warn!(%panel, error = %err, "Drive view refresh failed");
                    return;
                };
                warn!(%panel, path = %dir.display(), error = %err, "Directory vanished");
                self.fall_back(panel, &dir);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use handheld_core::FileEntry;

    use super::*;

    /// In-memory tree: directory path to its children.
    #[derive(Default)]
    struct MemoryFs {
        dirs: HashMap<PathBuf, Vec<FileEntry>>,
        opened: RefCell<Vec<PathBuf>>,
    }

    impl MemoryFs {
        fn with(mut self, dir: &str, children: &[&str]) -> Self {
            let entries = children
                .iter()
                .map(|name| match name.strip_suffix('/') {
                    Some(d) => FileEntry::directory(Path::new(dir).join(d)),
                    None => FileEntry::file(Path::new(dir).join(name)),
                })
                .collect();
            self.dirs.insert(PathBuf::from(dir), entries);
            self
        }
    }

    impl FileSystemProvider for MemoryFs {
        fn list_entries(&self, path: &Path) -> Result<Vec<FileEntry>, CommanderError> {
            let children = self.dirs.get(path).ok_or_else(|| CommanderError::NotFound {
                path: path.to_path_buf(),
            })?;
            let mut entries: Vec<_> = self.parent_of(path).map(FileEntry::parent).into_iter().collect();
            entries.extend(children.iter().cloned());
            Ok(entries)
        }

        fn parent_of(&self, path: &Path) -> Option<PathBuf> {
            path.parent().map(Path::to_path_buf)
        }

        fn list_roots(&self) -> Vec<PathBuf> {
            vec![PathBuf::from("/")]
        }

        fn open_with_default_handler(&self, path: &Path) -> Result<(), CommanderError> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn commander() -> Commander<MemoryFs> {
        let fs = MemoryFs::default()
            .with("/", &["docs/", "backup/"])
            .with("/docs", &["photos/", "notes.txt"])
            .with("/docs/photos", &[])
            .with("/backup", &[]);
        Commander::new(fs, "/docs", "/backup")
    }

    #[test]
    fn test_activate_directory_resets_selection() {
        let mut c = commander();
        c.move_selection(PanelId::Left, Direction::Down);
        assert_eq!(c.panel(PanelId::Left).selected(), 1);

        c.activate(PanelId::Left).unwrap();

        assert_eq!(
            c.panel(PanelId::Left).location(),
            &PanelLocation::Directory(PathBuf::from("/docs/photos"))
        );
        assert_eq!(c.panel(PanelId::Left).selected(), 0);
    }

    #[test]
    fn test_activate_file_opens_it() {
        let mut c = commander();
        c.move_selection(PanelId::Left, Direction::Down);
        c.move_selection(PanelId::Left, Direction::Down);
        c.take_changes();

        c.activate(PanelId::Left).unwrap();

        assert_eq!(*c.provider().opened.borrow(), vec![PathBuf::from("/docs/notes.txt")]);
        assert!(c.take_changes().is_empty());
    }

    #[test]
    fn test_up_from_root_shows_drives_then_stops() {
        let mut c = commander();
        c.navigate_up(PanelId::Left).unwrap();
        assert_eq!(
            c.panel(PanelId::Left).location(),
            &PanelLocation::Directory(PathBuf::from("/"))
        );
        assert_eq!(c.panel(PanelId::Left).selected_entry().map(|e| e.name.as_str()), Some("docs"));

        c.navigate_up(PanelId::Left).unwrap();
        assert!(c.panel(PanelId::Left).location().is_drives());
        assert_eq!(c.panel(PanelId::Left).breadcrumbs(), vec!["Drives"]);

        c.take_changes();
        c.navigate_up(PanelId::Left).unwrap();
        assert!(c.take_changes().is_empty());
    }

    #[test]
    fn test_switch_active_panel_is_idempotent() {
        let mut c = commander();
        assert!(!c.switch_active_panel(PanelId::Left));
        assert!(c.switch_active_panel(PanelId::Right));
        assert!(!c.switch_active_panel(PanelId::Right));
        assert_eq!(c.active_panel(), PanelId::Right);
    }

    #[test]
    fn test_refresh_falls_back_to_ancestor() {
        let mut c = commander();
        c.activate(PanelId::Left).unwrap();
        c.provider.dirs.remove(Path::new("/docs/photos"));

        c.refresh();

        assert_eq!(
            c.panel(PanelId::Left).location(),
            &PanelLocation::Directory(PathBuf::from("/docs"))
        );
    }

    #[test]
    fn test_missing_start_directory_falls_back() {
        let fs = MemoryFs::default().with("/", &["docs/"]);
        let c = Commander::new(fs, "/docs/gone", "/nowhere/at/all");
        assert_eq!(
            c.panel(PanelId::Right).location(),
            &PanelLocation::Directory(PathBuf::from("/"))
        );
    }
}
