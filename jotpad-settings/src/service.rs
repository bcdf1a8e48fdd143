//! The application settings service.
//!
//! [`AppSettings`] owns the in-memory value of every setting for the life of
//! the process. It is built once from a [`SettingsStore`], after which each
//! setter persists the new value, updates memory and then notifies the
//! matching [`EventChannel`] in [`SettingsEvents`].
//!
//! Loading never fails. A missing entry silently takes its default; an entry
//! that does not decode (wrong JSON type, unknown enum name, unresolvable
//! code page) takes its default and logs a warning.

use crate::defaults;
use crate::error::{Result, SettingsError};
use crate::events::EventChannel;
use crate::keys;
use crate::store::SettingsStore;
use crate::types::{
    DETECT_CODE_PAGE, FontStyle, FontVariant, FontWeight, LineEnding, SearchEngine, TabIndents,
    TextEncoding, TextWrapping, resolve_font,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Facts about the running process that influence some defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchContext {
    /// False when another editor process already owns the session files.
    pub is_primary_instance: bool,
    /// True when running as a compact game-bar widget.
    pub is_game_bar_widget: bool,
    /// The system ANSI code page, if the platform reports one.
    pub system_ansi_code_page: Option<u16>,
}

impl Default for LaunchContext {
    fn default() -> Self {
        Self {
            is_primary_instance: true,
            is_game_bar_widget: false,
            system_ansi_code_page: None,
        }
    }
}

/// Font attributes that have their own change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontAttribute {
    Family,
    Size,
    Style,
    Weight,
}

impl FontAttribute {
    pub const ALL: [FontAttribute; 4] = [
        FontAttribute::Family,
        FontAttribute::Size,
        FontAttribute::Style,
        FontAttribute::Weight,
    ];
}

/// Change-notification channels, one per observable setting.
///
/// Font channels carry the *effective* value (see [`resolve_font`]), so a
/// listener never needs to know which variant is active.
#[derive(Debug, Default)]
pub struct SettingsEvents {
    pub use_alt_font: EventChannel<bool>,
    pub font_family: EventChannel<String>,
    pub font_size: EventChannel<u32>,
    pub font_style: EventChannel<FontStyle>,
    pub font_weight: EventChannel<FontWeight>,
    pub text_wrapping: EventChannel<TextWrapping>,
    pub line_highlighter: EventChannel<bool>,
    pub line_numbers: EventChannel<bool>,
    pub line_ending: EventChannel<LineEnding>,
    pub encoding: EventChannel<TextEncoding>,
    pub tab_indents: EventChannel<TabIndents>,
    pub status_bar_visibility: EventChannel<bool>,
    pub session_snapshot: EventChannel<bool>,
    pub highlight_misspelled_words: EventChannel<bool>,
}

/// Plain copy of every stored setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub default_font: FontVariant,
    pub alt_font: FontVariant,
    pub use_alt_font: bool,
    pub text_wrapping: TextWrapping,
    pub display_line_highlighter: bool,
    pub display_line_numbers: bool,
    pub line_ending: LineEnding,
    pub encoding: TextEncoding,
    /// `None` means detect per file.
    pub decoding: Option<TextEncoding>,
    pub tab_indents: TabIndents,
    pub search_engine: SearchEngine,
    pub custom_search_url: String,
    pub show_status_bar: bool,
    pub session_snapshot_enabled: bool,
    pub highlight_misspelled_words: bool,
    pub always_open_new_window: bool,
    pub smart_copy_enabled: bool,
}

/// Typed facade over the persistent settings store.
///
/// Single-threaded by construction: the event channels are `!Send`, so the
/// service stays on the thread that created it.
pub struct AppSettings<S: SettingsStore> {
    store: S,
    launch: LaunchContext,
    values: SettingsSnapshot,
    events: SettingsEvents,
}

impl<S: SettingsStore> std::fmt::Debug for AppSettings<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("launch", &self.launch)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Decode `key`, or `None` when absent or malformed (malformed is logged).
fn read_opt<S: SettingsStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = store.read(key)?;
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!(
                "Ignoring malformed setting '{}' (stored value {}): {}",
                key,
                raw,
                e
            );
            None
        }
    }
}

fn read_or<S: SettingsStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    read_opt(store, key).unwrap_or_else(default)
}

fn load_font(
    store: &impl SettingsStore,
    family_key: &str,
    size_key: &str,
    style_key: &str,
    weight_key: &str,
    default: FontVariant,
) -> FontVariant {
    FontVariant {
        family: read_or(store, family_key, || default.family.clone()),
        size: read_or(store, size_key, || default.size),
        style: read_or(store, style_key, || default.style),
        weight: read_or(store, weight_key, || default.weight),
    }
}

fn load_encoding(store: &impl SettingsStore) -> TextEncoding {
    let Some(code_page) = read_opt::<_, i64>(store, keys::EDITOR_DEFAULT_ENCODING_CODE_PAGE)
    else {
        return defaults::encoding();
    };

    match u16::try_from(code_page)
        .ok()
        .and_then(|cp| TextEncoding::from_code_page(cp, false))
    {
        Some(TextEncoding::Utf8 { .. }) => TextEncoding::Utf8 {
            emit_bom: read_or(store, keys::EDITOR_DEFAULT_UTF8_EMIT_BOM, defaults::bool_false),
        },
        Some(encoding) => encoding,
        None => {
            log::warn!(
                "Failed to resolve default encoding, code page: {}; using {}",
                code_page,
                defaults::encoding()
            );
            defaults::encoding()
        }
    }
}

fn load_decoding(store: &impl SettingsStore) -> Option<TextEncoding> {
    let code_page = read_opt::<_, i64>(store, keys::EDITOR_DEFAULT_DECODING_CODE_PAGE)?;
    if code_page == DETECT_CODE_PAGE {
        return None;
    }

    match u16::try_from(code_page)
        .ok()
        .and_then(|cp| TextEncoding::from_code_page(cp, false))
    {
        Some(encoding) => Some(encoding.without_bom()),
        None => {
            log::warn!(
                "Failed to resolve default decoding, code page: {}; detecting at runtime",
                code_page
            );
            defaults::decoding()
        }
    }
}

fn load_session_snapshot(store: &impl SettingsStore, launch: &LaunchContext) -> bool {
    // Session files are owned by the primary instance only.
    if !launch.is_primary_instance {
        false
    } else if launch.is_game_bar_widget {
        true
    } else {
        read_or(
            store,
            keys::EDITOR_ENABLE_SESSION_BACKUP_AND_RESTORE,
            defaults::bool_false,
        )
    }
}

impl<S: SettingsStore> AppSettings<S> {
    /// Load every setting from `store`, substituting defaults where needed.
    pub fn load(store: S, launch: LaunchContext) -> Self {
        let values = SettingsSnapshot {
            default_font: load_font(
                &store,
                keys::EDITOR_FONT_FAMILY,
                keys::EDITOR_FONT_SIZE,
                keys::EDITOR_FONT_STYLE,
                keys::EDITOR_FONT_WEIGHT,
                defaults::default_font(),
            ),
            alt_font: load_font(
                &store,
                keys::EDITOR_ALT_FONT_FAMILY,
                keys::EDITOR_ALT_FONT_SIZE,
                keys::EDITOR_ALT_FONT_STYLE,
                keys::EDITOR_ALT_FONT_WEIGHT,
                defaults::alt_font(),
            ),
            use_alt_font: read_or(&store, keys::EDITOR_USE_ALT_FONT, defaults::bool_false),
            text_wrapping: read_or(
                &store,
                keys::EDITOR_DEFAULT_TEXT_WRAPPING,
                defaults::text_wrapping,
            ),
            display_line_highlighter: read_or(
                &store,
                keys::EDITOR_DISPLAY_LINE_HIGHLIGHTER,
                defaults::bool_true,
            ),
            display_line_numbers: read_or(
                &store,
                keys::EDITOR_DISPLAY_LINE_NUMBERS,
                defaults::bool_true,
            ),
            line_ending: read_or(&store, keys::EDITOR_DEFAULT_LINE_ENDING, defaults::line_ending),
            encoding: load_encoding(&store),
            decoding: load_decoding(&store),
            tab_indents: read_or(&store, keys::EDITOR_DEFAULT_TAB_INDENTS, defaults::tab_indents),
            search_engine: read_or(
                &store,
                keys::EDITOR_DEFAULT_SEARCH_ENGINE,
                defaults::search_engine,
            ),
            custom_search_url: read_or(&store, keys::EDITOR_CUSTOM_SEARCH_URL, String::new),
            show_status_bar: read_or(&store, keys::EDITOR_SHOW_STATUS_BAR, defaults::bool_true),
            session_snapshot_enabled: load_session_snapshot(&store, &launch),
            highlight_misspelled_words: read_or(
                &store,
                keys::EDITOR_HIGHLIGHT_MISSPELLED_WORDS,
                defaults::bool_false,
            ),
            always_open_new_window: read_or(
                &store,
                keys::ALWAYS_OPEN_NEW_WINDOW,
                defaults::bool_false,
            ),
            smart_copy_enabled: read_or(
                &store,
                keys::EDITOR_ENABLE_SMART_COPY,
                defaults::bool_false,
            ),
        };

        log::info!(
            "Settings loaded (font: {} {}pt, encoding: {}, session snapshot: {})",
            resolve_font(values.use_alt_font, &values.default_font, &values.alt_font).family,
            resolve_font(values.use_alt_font, &values.default_font, &values.alt_font).size,
            values.encoding,
            values.session_snapshot_enabled
        );

        Self {
            store,
            launch,
            values,
            events: SettingsEvents::default(),
        }
    }

    pub fn events(&self) -> &SettingsEvents {
        &self.events
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        self.values.clone()
    }

    pub fn launch_context(&self) -> &LaunchContext {
        &self.launch
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Serialize and write one value. Nothing in memory changes on failure.
    ///
    /// A value whose stored form would not load back is refused, so the next
    /// [`load`](Self::load) never treats a value written here as malformed.
    fn persist<T: Serialize + DeserializeOwned>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw: Value = serde_json::to_value(value)?;
        if let Err(e) = serde_json::from_value::<T>(raw.clone()) {
            log::warn!("Refusing to persist setting '{}' as {}: {}", key, raw, e);
            return Err(SettingsError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            });
        }
        self.store.write(key, raw)?;
        log::debug!("Setting '{}' updated", key);
        Ok(())
    }

    fn notify_font_change(&self, attributes: &[FontAttribute]) {
        let font = self.effective_font();
        for attribute in attributes {
            match attribute {
                FontAttribute::Family => self.events.font_family.emit(&font.family),
                FontAttribute::Size => self.events.font_size.emit(&font.size),
                FontAttribute::Style => self.events.font_style.emit(&font.style),
                FontAttribute::Weight => self.events.font_weight.emit(&font.weight),
            }
        }
    }

    // ========================================================================
    // Fonts
    // ========================================================================

    /// The font currently rendered, recomputed on every call.
    pub fn effective_font(&self) -> &FontVariant {
        resolve_font(
            self.values.use_alt_font,
            &self.values.default_font,
            &self.values.alt_font,
        )
    }

    pub fn effective_font_family(&self) -> &str {
        &self.effective_font().family
    }

    pub fn effective_font_size(&self) -> u32 {
        self.effective_font().size
    }

    pub fn effective_font_style(&self) -> FontStyle {
        self.effective_font().style
    }

    pub fn effective_font_weight(&self) -> FontWeight {
        self.effective_font().weight
    }

    pub fn use_alt_font(&self) -> bool {
        self.values.use_alt_font
    }

    /// Switch between the default and alternate font.
    ///
    /// Every effective font attribute may change, so all four font events
    /// fire before `use_alt_font`.
    pub fn set_use_alt_font(&mut self, use_alt: bool) -> Result<()> {
        self.persist(keys::EDITOR_USE_ALT_FONT, &use_alt)?;
        self.values.use_alt_font = use_alt;
        self.notify_font_change(&FontAttribute::ALL);
        self.events.use_alt_font.emit(&use_alt);
        Ok(())
    }

    pub fn default_font(&self) -> &FontVariant {
        &self.values.default_font
    }

    pub fn alt_font(&self) -> &FontVariant {
        &self.values.alt_font
    }

    pub fn default_font_family(&self) -> &str {
        &self.values.default_font.family
    }

    pub fn set_default_font_family(&mut self, family: impl Into<String>) -> Result<()> {
        let family = family.into();
        self.persist(keys::EDITOR_FONT_FAMILY, &family)?;
        self.values.default_font.family = family;
        self.notify_font_change(&[FontAttribute::Family]);
        Ok(())
    }

    pub fn default_font_size(&self) -> u32 {
        self.values.default_font.size
    }

    pub fn set_default_font_size(&mut self, size: u32) -> Result<()> {
        self.persist(keys::EDITOR_FONT_SIZE, &size)?;
        self.values.default_font.size = size;
        self.notify_font_change(&[FontAttribute::Size]);
        Ok(())
    }

    pub fn default_font_style(&self) -> FontStyle {
        self.values.default_font.style
    }

    pub fn set_default_font_style(&mut self, style: FontStyle) -> Result<()> {
        self.persist(keys::EDITOR_FONT_STYLE, &style)?;
        self.values.default_font.style = style;
        self.notify_font_change(&[FontAttribute::Style]);
        Ok(())
    }

    pub fn default_font_weight(&self) -> FontWeight {
        self.values.default_font.weight
    }

    pub fn set_default_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        self.persist(keys::EDITOR_FONT_WEIGHT, &weight)?;
        self.values.default_font.weight = weight;
        self.notify_font_change(&[FontAttribute::Weight]);
        Ok(())
    }

    pub fn alt_font_family(&self) -> &str {
        &self.values.alt_font.family
    }

    pub fn set_alt_font_family(&mut self, family: impl Into<String>) -> Result<()> {
        let family = family.into();
        self.persist(keys::EDITOR_ALT_FONT_FAMILY, &family)?;
        self.values.alt_font.family = family;
        self.notify_font_change(&[FontAttribute::Family]);
        Ok(())
    }

    pub fn alt_font_size(&self) -> u32 {
        self.values.alt_font.size
    }

    pub fn set_alt_font_size(&mut self, size: u32) -> Result<()> {
        self.persist(keys::EDITOR_ALT_FONT_SIZE, &size)?;
        self.values.alt_font.size = size;
        self.notify_font_change(&[FontAttribute::Size]);
        Ok(())
    }

    pub fn alt_font_style(&self) -> FontStyle {
        self.values.alt_font.style
    }

    pub fn set_alt_font_style(&mut self, style: FontStyle) -> Result<()> {
        self.persist(keys::EDITOR_ALT_FONT_STYLE, &style)?;
        self.values.alt_font.style = style;
        self.notify_font_change(&[FontAttribute::Style]);
        Ok(())
    }

    pub fn alt_font_weight(&self) -> FontWeight {
        self.values.alt_font.weight
    }

    pub fn set_alt_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        self.persist(keys::EDITOR_ALT_FONT_WEIGHT, &weight)?;
        self.values.alt_font.weight = weight;
        self.notify_font_change(&[FontAttribute::Weight]);
        Ok(())
    }

    // ========================================================================
    // Editor view
    // ========================================================================

    pub fn text_wrapping(&self) -> TextWrapping {
        self.values.text_wrapping
    }

    pub fn set_text_wrapping(&mut self, wrapping: TextWrapping) -> Result<()> {
        self.persist(keys::EDITOR_DEFAULT_TEXT_WRAPPING, &wrapping)?;
        self.values.text_wrapping = wrapping;
        self.events.text_wrapping.emit(&wrapping);
        Ok(())
    }

    pub fn display_line_highlighter(&self) -> bool {
        self.values.display_line_highlighter
    }

    pub fn set_display_line_highlighter(&mut self, display: bool) -> Result<()> {
        self.persist(keys::EDITOR_DISPLAY_LINE_HIGHLIGHTER, &display)?;
        self.values.display_line_highlighter = display;
        self.events.line_highlighter.emit(&display);
        Ok(())
    }

    pub fn display_line_numbers(&self) -> bool {
        self.values.display_line_numbers
    }

    pub fn set_display_line_numbers(&mut self, display: bool) -> Result<()> {
        self.persist(keys::EDITOR_DISPLAY_LINE_NUMBERS, &display)?;
        self.values.display_line_numbers = display;
        self.events.line_numbers.emit(&display);
        Ok(())
    }

    pub fn show_status_bar(&self) -> bool {
        self.values.show_status_bar
    }

    pub fn set_show_status_bar(&mut self, show: bool) -> Result<()> {
        self.persist(keys::EDITOR_SHOW_STATUS_BAR, &show)?;
        self.values.show_status_bar = show;
        self.events.status_bar_visibility.emit(&show);
        Ok(())
    }

    pub fn highlight_misspelled_words(&self) -> bool {
        self.values.highlight_misspelled_words
    }

    pub fn set_highlight_misspelled_words(&mut self, highlight: bool) -> Result<()> {
        self.persist(keys::EDITOR_HIGHLIGHT_MISSPELLED_WORDS, &highlight)?;
        self.values.highlight_misspelled_words = highlight;
        self.events.highlight_misspelled_words.emit(&highlight);
        Ok(())
    }

    // ========================================================================
    // Documents
    // ========================================================================

    pub fn line_ending(&self) -> LineEnding {
        self.values.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) -> Result<()> {
        self.persist(keys::EDITOR_DEFAULT_LINE_ENDING, &line_ending)?;
        self.values.line_ending = line_ending;
        self.events.line_ending.emit(&line_ending);
        Ok(())
    }

    pub fn encoding(&self) -> TextEncoding {
        self.values.encoding
    }

    /// Set the encoding for new documents.
    ///
    /// For UTF-8 the BOM flag is persisted alongside the code page.
    pub fn set_encoding(&mut self, encoding: TextEncoding) -> Result<()> {
        if let TextEncoding::Utf8 { emit_bom } = encoding {
            self.persist(keys::EDITOR_DEFAULT_UTF8_EMIT_BOM, &emit_bom)?;
        }
        self.persist(keys::EDITOR_DEFAULT_ENCODING_CODE_PAGE, &encoding.code_page())?;
        self.values.encoding = encoding;
        self.events.encoding.emit(&encoding);
        Ok(())
    }

    /// Encoding used to open files, or `None` to detect per file.
    ///
    /// A stored legacy decoding follows the current system ANSI code page,
    /// falling back to UTF-8 when the platform reports none.
    pub fn decoding(&self) -> Option<TextEncoding> {
        match self.values.decoding? {
            utf8 @ TextEncoding::Utf8 { .. } => Some(utf8),
            TextEncoding::CodePage { .. } => Some(
                self.launch
                    .system_ansi_code_page
                    .and_then(|cp| TextEncoding::from_code_page(cp, false))
                    .unwrap_or(TextEncoding::Utf8 { emit_bom: false }),
            ),
        }
    }

    pub fn set_decoding(&mut self, decoding: Option<TextEncoding>) -> Result<()> {
        let code_page = decoding.map_or(DETECT_CODE_PAGE, |enc| i64::from(enc.code_page()));
        self.persist(keys::EDITOR_DEFAULT_DECODING_CODE_PAGE, &code_page)?;
        self.values.decoding = decoding.map(TextEncoding::without_bom);
        Ok(())
    }

    pub fn tab_indents(&self) -> TabIndents {
        self.values.tab_indents
    }

    pub fn set_tab_indents(&mut self, indents: TabIndents) -> Result<()> {
        self.persist(keys::EDITOR_DEFAULT_TAB_INDENTS, &indents)?;
        self.values.tab_indents = indents;
        self.events.tab_indents.emit(&indents);
        Ok(())
    }

    // ========================================================================
    // Application behaviour
    // ========================================================================

    pub fn search_engine(&self) -> SearchEngine {
        self.values.search_engine
    }

    pub fn set_search_engine(&mut self, engine: SearchEngine) -> Result<()> {
        self.persist(keys::EDITOR_DEFAULT_SEARCH_ENGINE, &engine)?;
        self.values.search_engine = engine;
        Ok(())
    }

    pub fn custom_search_url(&self) -> &str {
        &self.values.custom_search_url
    }

    pub fn set_custom_search_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        self.persist(keys::EDITOR_CUSTOM_SEARCH_URL, &url)?;
        self.values.custom_search_url = url;
        Ok(())
    }

    pub fn session_snapshot_enabled(&self) -> bool {
        self.values.session_snapshot_enabled
    }

    pub fn set_session_snapshot_enabled(&mut self, enabled: bool) -> Result<()> {
        self.persist(keys::EDITOR_ENABLE_SESSION_BACKUP_AND_RESTORE, &enabled)?;
        self.values.session_snapshot_enabled = enabled;
        self.events.session_snapshot.emit(&enabled);
        Ok(())
    }

    pub fn always_open_new_window(&self) -> bool {
        self.values.always_open_new_window
    }

    pub fn set_always_open_new_window(&mut self, always: bool) -> Result<()> {
        self.persist(keys::ALWAYS_OPEN_NEW_WINDOW, &always)?;
        self.values.always_open_new_window = always;
        Ok(())
    }

    pub fn smart_copy_enabled(&self) -> bool {
        self.values.smart_copy_enabled
    }

    pub fn set_smart_copy_enabled(&mut self, enabled: bool) -> Result<()> {
        self.persist(keys::EDITOR_ENABLE_SMART_COPY, &enabled)?;
        self.values.smart_copy_enabled = enabled;
        Ok(())
    }
}
