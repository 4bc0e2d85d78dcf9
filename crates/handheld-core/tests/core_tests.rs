use std::path::PathBuf;

use handheld_core::{
    Button, ButtonSet, CommanderConfig, CommanderError, EntryKind, FileEntry, InputBackend,
    PanelId,
};
use strum::IntoEnumIterator;

#[test]
fn test_every_button_has_a_distinct_bit() {
    let mut seen = 0u16;
    for button in Button::iter() {
        assert_eq!(seen & button.bit(), 0, "{button} shares a bit");
        seen |= button.bit();
    }
    assert_eq!(ButtonSet::all().bits(), seen);
}

#[test]
fn test_set_algebra() {
    let held = ButtonSet::from(Button::A).with(Button::B).with(Button::X);
    let armed = ButtonSet::from(Button::A).with(Button::X);

    assert_eq!(held.intersection(armed), armed);
    assert_eq!(held.difference(armed), ButtonSet::from(Button::B));
    assert_eq!(armed.union(ButtonSet::from(Button::Y)).len(), 3);
    assert!(ButtonSet::EMPTY.is_empty());
}

#[test]
fn test_entry_kinds() {
    let entries = [
        FileEntry::parent("/"),
        FileEntry::directory("/docs"),
        FileEntry::file("/docs/notes.txt"),
        FileEntry::drive("/"),
    ];
    let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EntryKind::Parent, EntryKind::Directory, EntryKind::File, EntryKind::Drive]
    );
    assert_eq!(entries.iter().filter(|e| e.is_directory()).count(), 3);
}

#[test]
fn test_panel_iteration_order() {
    let panels: Vec<PanelId> = PanelId::iter().collect();
    assert_eq!(panels, vec![PanelId::Left, PanelId::Right]);
    assert_eq!(PanelId::default(), PanelId::Left);
}

#[test]
fn test_config_roundtrip_through_builder() {
    let config = CommanderConfig::builder()
        .poll_interval_ms(50u64)
        .left_path(PathBuf::from("/docs"))
        .right_path(PathBuf::from("/backup"))
        .backend(InputBackend::Sdl)
        .log_filter("debug")
        .build()
        .unwrap();

    assert_eq!(config.poll_interval().as_millis(), 50);
    assert_eq!(config.start_path(PanelId::Right), Some(&PathBuf::from("/backup")));
    assert_eq!(config.backend, InputBackend::Sdl);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_catches_bad_interval() {
    let config = CommanderConfig {
        poll_interval_ms: 1,
        ..CommanderConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, CommanderError::InvalidConfig { .. }));
}
