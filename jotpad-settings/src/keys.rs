//! Stable persistent-store keys, one per setting.
//!
//! Renaming a key orphans every user's stored value, so these never change.

pub const EDITOR_FONT_FAMILY: &str = "editor_font_family";
pub const EDITOR_FONT_SIZE: &str = "editor_font_size";
pub const EDITOR_FONT_STYLE: &str = "editor_font_style";
pub const EDITOR_FONT_WEIGHT: &str = "editor_font_weight";

pub const EDITOR_ALT_FONT_FAMILY: &str = "editor_alt_font_family";
pub const EDITOR_ALT_FONT_SIZE: &str = "editor_alt_font_size";
pub const EDITOR_ALT_FONT_STYLE: &str = "editor_alt_font_style";
pub const EDITOR_ALT_FONT_WEIGHT: &str = "editor_alt_font_weight";
pub const EDITOR_USE_ALT_FONT: &str = "editor_use_alt_font";

pub const EDITOR_DEFAULT_TEXT_WRAPPING: &str = "editor_default_text_wrapping";
pub const EDITOR_DISPLAY_LINE_HIGHLIGHTER: &str = "editor_display_line_highlighter";
pub const EDITOR_DISPLAY_LINE_NUMBERS: &str = "editor_display_line_numbers";
pub const EDITOR_DEFAULT_LINE_ENDING: &str = "editor_default_line_ending";
pub const EDITOR_DEFAULT_ENCODING_CODE_PAGE: &str = "editor_default_encoding_code_page";
pub const EDITOR_DEFAULT_UTF8_EMIT_BOM: &str = "editor_default_utf8_emit_bom";
pub const EDITOR_DEFAULT_DECODING_CODE_PAGE: &str = "editor_default_decoding_code_page";
pub const EDITOR_DEFAULT_TAB_INDENTS: &str = "editor_default_tab_indents";
pub const EDITOR_DEFAULT_SEARCH_ENGINE: &str = "editor_default_search_engine";
pub const EDITOR_CUSTOM_SEARCH_URL: &str = "editor_custom_search_url";
pub const EDITOR_SHOW_STATUS_BAR: &str = "editor_show_status_bar";
pub const EDITOR_ENABLE_SESSION_BACKUP_AND_RESTORE: &str =
    "editor_enable_session_backup_and_restore";
pub const EDITOR_HIGHLIGHT_MISSPELLED_WORDS: &str = "editor_highlight_misspelled_words";
pub const EDITOR_ENABLE_SMART_COPY: &str = "editor_enable_smart_copy";
pub const ALWAYS_OPEN_NEW_WINDOW: &str = "always_open_new_window";
