//! Settings behaviour as seen through the root crate's entry points.

mod common;

use common::settings_in_temp_dir;
use jotpad::settings::{FontWeight, JsonFileStore, LaunchContext, SettingsStore, TabIndents, keys};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn fresh_file_yields_defaults() {
    let (_dir, path, settings) = settings_in_temp_dir(LaunchContext::default());

    assert_eq!(settings.effective_font_family(), "Consolas");
    assert_eq!(settings.effective_font_size(), 14);
    assert_eq!(settings.effective_font_weight(), FontWeight::NORMAL);
    assert_eq!(settings.tab_indents(), TabIndents::Tabs);
    assert!(settings.decoding().is_none());
    assert!(!path.exists());
}

#[test]
fn changes_survive_reopen() {
    let (_dir, path, mut settings) = settings_in_temp_dir(LaunchContext::default());

    settings.set_alt_font_family("Fira Code").unwrap();
    settings.set_use_alt_font(true).unwrap();
    settings.set_tab_indents(TabIndents::Spaces(4)).unwrap();
    drop(settings);

    let reopened = jotpad::open_settings_at(&path, LaunchContext::default()).unwrap();
    assert!(reopened.use_alt_font());
    assert_eq!(reopened.effective_font_family(), "Fira Code");
    assert_eq!(reopened.tab_indents(), TabIndents::Spaces(4));

    let store = reopened.into_store();
    assert_eq!(store.read(keys::EDITOR_DEFAULT_TAB_INDENTS), Some(json!(4)));
}

#[test]
fn alt_family_change_notifies_once() {
    let (_dir, _path, mut settings) = settings_in_temp_dir(LaunchContext::default());
    settings.set_use_alt_font(true).unwrap();

    let families = Rc::new(RefCell::new(Vec::new()));
    let sizes = Rc::new(RefCell::new(0));
    let _family_sub = {
        let families = Rc::clone(&families);
        settings
            .events()
            .font_family
            .subscribe(move |family: &String| families.borrow_mut().push(family.clone()))
    };
    let _size_sub = {
        let sizes = Rc::clone(&sizes);
        settings
            .events()
            .font_size
            .subscribe(move |_: &u32| *sizes.borrow_mut() += 1)
    };

    settings.set_alt_font_family("Arial").unwrap();

    assert_eq!(*families.borrow(), vec!["Arial".to_string()]);
    assert_eq!(*sizes.borrow(), 0);
    assert_eq!(settings.effective_font_family(), "Arial");
}

#[test]
fn secondary_instance_disables_session_snapshot() {
    let launch = LaunchContext {
        is_primary_instance: false,
        ..LaunchContext::default()
    };
    let (_dir, path, mut settings) = settings_in_temp_dir(launch);
    settings.set_session_snapshot_enabled(true).unwrap();
    drop(settings);

    let secondary = jotpad::open_settings_at(&path, launch).unwrap();
    assert!(!secondary.session_snapshot_enabled());

    let primary = jotpad::open_settings_at(&path, LaunchContext::default()).unwrap();
    assert!(primary.session_snapshot_enabled());
}

#[test]
fn corrupt_settings_file_is_an_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = jotpad::open_settings_at(&path, LaunchContext::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to open settings file"));
    assert!(JsonFileStore::open(&path).is_err());
}
