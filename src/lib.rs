// Library entry point for the jotpad editor core.
//
// # Threading
//
// Settings and the find/replace controller are single-threaded: their change
// notifications are `Rc`-based, so neither type is `Send` and both must stay
// on the UI thread that created them. Background work that needs to reach
// them (accent colour changes, for example) goes through the `Send` handles
// they hand out and is applied when the owning thread pumps its queue.

/// Application version (root crate version, for use by sub-crates).
/// Sub-crates should receive this via parameter rather than using
/// `env!("CARGO_PKG_VERSION")` which resolves to the sub-crate's version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod find_replace;

pub use jotpad_keybindings as keybindings;
pub use jotpad_settings as settings;

use anyhow::Context;
use jotpad_settings::{AppSettings, JsonFileStore, LaunchContext};

/// Load the settings stored at the platform default location.
pub fn open_default_settings(launch: LaunchContext) -> anyhow::Result<AppSettings<JsonFileStore>> {
    let path = JsonFileStore::default_path();
    open_settings_at(&path, launch)
}

/// Load the settings stored in the JSON file at `path`.
///
/// A missing file is fine; every setting then starts at its default.
pub fn open_settings_at(
    path: &std::path::Path,
    launch: LaunchContext,
) -> anyhow::Result<AppSettings<JsonFileStore>> {
    let store = JsonFileStore::open(path)
        .inspect_err(|e| debug_error!("SETTINGS", "Cannot open {:?}: {}", path, e))
        .with_context(|| format!("Failed to open settings file {:?}", path))?;
    debug_info!("SETTINGS", "Loaded settings store from {:?}", path);
    Ok(AppSettings::load(store, launch))
}
