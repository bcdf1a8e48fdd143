//! Settings service for the jotpad text editor.
//!
//! This crate provides the application-wide preferences used by every
//! editor window. It includes:
//!
//! - A typed settings facade with default fallback ([`AppSettings`])
//! - Effective-font resolution between the default and alternate font
//! - Change-notification channels with subscription handles
//! - Persistent stores (in-memory and JSON file)
//! - Code-page backed text encodings

pub mod defaults;
pub mod error;
pub mod events;
pub mod keys;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Result, SettingsError};
pub use events::{EventChannel, Subscription};
pub use service::{AppSettings, FontAttribute, LaunchContext, SettingsEvents, SettingsSnapshot};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use types::{
    DETECT_CODE_PAGE, FontStyle, FontVariant, FontWeight, LineEnding, SearchEngine, TabIndents,
    TextEncoding, TextWrapping, UTF8_CODE_PAGE, encoding_for_code_page, resolve_font,
};
