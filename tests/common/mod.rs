//! Shared integration test helpers for jotpad.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{record_events, settings_in_temp_dir};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use jotpad::find_replace::{FindReplaceController, FindReplaceEvent};
use jotpad::settings::{AppSettings, JsonFileStore, LaunchContext, Subscription};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// Everything a controller emits, in order.
pub type EventLog = Rc<RefCell<Vec<FindReplaceEvent>>>;

/// Record every event `controller` emits while the returned subscription lives.
pub fn record_events(controller: &FindReplaceController) -> (EventLog, Subscription) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sub = {
        let log = Rc::clone(&log);
        controller
            .events()
            .subscribe(move |event: &FindReplaceEvent| log.borrow_mut().push(event.clone()))
    };
    (log, sub)
}

/// Settings backed by a JSON file inside a fresh temp dir.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn settings_in_temp_dir(launch: LaunchContext) -> (TempDir, PathBuf, AppSettings<JsonFileStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("jotpad").join("settings.json");
    let settings =
        jotpad::open_settings_at(&path, launch).expect("Failed to open settings store");
    (temp_dir, path, settings)
}
