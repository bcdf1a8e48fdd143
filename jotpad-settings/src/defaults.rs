//! Default values used when a setting is absent or malformed in the store.

use crate::types::{
    FontStyle, FontVariant, FontWeight, LineEnding, SearchEngine, TabIndents, TextEncoding,
    TextWrapping,
};

pub fn font_family() -> String {
    "Consolas".to_string()
}

pub fn alt_font_family() -> String {
    "Arial".to_string()
}

pub fn font_size() -> u32 {
    14
}

pub fn font_style() -> FontStyle {
    FontStyle::Normal
}

pub fn font_weight() -> FontWeight {
    FontWeight::NORMAL
}

pub fn default_font() -> FontVariant {
    FontVariant {
        family: font_family(),
        size: font_size(),
        style: font_style(),
        weight: font_weight(),
    }
}

pub fn alt_font() -> FontVariant {
    FontVariant {
        family: alt_font_family(),
        ..default_font()
    }
}

pub fn text_wrapping() -> TextWrapping {
    TextWrapping::NoWrap
}

pub fn line_ending() -> LineEnding {
    LineEnding::Crlf
}

pub fn encoding() -> TextEncoding {
    TextEncoding::Utf8 { emit_bom: false }
}

/// `None` means the decoder guesses the encoding per file.
pub fn decoding() -> Option<TextEncoding> {
    None
}

pub fn tab_indents() -> TabIndents {
    TabIndents::Tabs
}

pub fn search_engine() -> SearchEngine {
    SearchEngine::Bing
}

pub fn bool_true() -> bool {
    true
}

pub fn bool_false() -> bool {
    false
}
