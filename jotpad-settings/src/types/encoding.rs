//! Text encodings identified by Windows code page numbers.
//!
//! The settings file stores encodings the way the editor's save dialog
//! presents them: as a code page number plus, for UTF-8, whether a byte-order
//! mark is written. `encoding_rs` supplies the codecs.

use encoding_rs::Encoding;
use std::fmt;

/// Code page number of UTF-8.
pub const UTF8_CODE_PAGE: u16 = 65001;

/// Persisted decoding code page meaning "detect the encoding at runtime".
pub const DETECT_CODE_PAGE: i64 = -1;

/// An encoding the editor can save or open files with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8 {
        emit_bom: bool,
    },
    /// Any non-UTF-8 code page `encoding_rs` knows about.
    CodePage {
        code_page: u16,
        encoding: &'static Encoding,
    },
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8 { emit_bom: false }
    }
}

impl TextEncoding {
    /// Resolve a code page number.
    ///
    /// `emit_bom` only applies to UTF-8. Returns `None` for code pages that
    /// cannot be resolved.
    pub fn from_code_page(code_page: u16, emit_bom: bool) -> Option<Self> {
        if code_page == UTF8_CODE_PAGE {
            return Some(TextEncoding::Utf8 { emit_bom });
        }
        encoding_for_code_page(code_page)
            .map(|encoding| TextEncoding::CodePage { code_page, encoding })
    }

    pub fn code_page(self) -> u16 {
        match self {
            TextEncoding::Utf8 { .. } => UTF8_CODE_PAGE,
            TextEncoding::CodePage { code_page, .. } => code_page,
        }
    }

    pub fn is_utf8(self) -> bool {
        matches!(self, TextEncoding::Utf8 { .. })
    }

    /// Whether a UTF-8 byte-order mark is written (always false otherwise).
    pub fn emits_bom(self) -> bool {
        matches!(self, TextEncoding::Utf8 { emit_bom: true })
    }

    /// The underlying codec.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 { .. } => encoding_rs::UTF_8,
            TextEncoding::CodePage { encoding, .. } => encoding,
        }
    }

    /// Same encoding without a byte-order mark.
    pub fn without_bom(self) -> Self {
        match self {
            TextEncoding::Utf8 { .. } => TextEncoding::Utf8 { emit_bom: false },
            other => other,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 { emit_bom: true } => f.write_str("UTF-8-BOM"),
            TextEncoding::Utf8 { emit_bom: false } => f.write_str("UTF-8"),
            TextEncoding::CodePage { encoding, .. } => f.write_str(encoding.name()),
        }
    }
}

/// Map a Windows code page to the matching `encoding_rs` codec.
///
/// Latin-1 and US-ASCII map to windows-1252, matching the WHATWG encoding
/// standard `encoding_rs` implements.
pub fn encoding_for_code_page(code_page: u16) -> Option<&'static Encoding> {
    use encoding_rs::*;

    let encoding = match code_page {
        65001 => UTF_8,
        1200 => UTF_16LE,
        1201 => UTF_16BE,
        866 => IBM866,
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        1252 | 20127 | 28591 => WINDOWS_1252,
        1253 => WINDOWS_1253,
        1254 | 28599 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        10000 => MACINTOSH,
        10007 => X_MAC_CYRILLIC,
        20866 => KOI8_R,
        21866 => KOI8_U,
        28592 => ISO_8859_2,
        28593 => ISO_8859_3,
        28594 => ISO_8859_4,
        28595 => ISO_8859_5,
        28596 => ISO_8859_6,
        28597 => ISO_8859_7,
        28598 => ISO_8859_8,
        28603 => ISO_8859_13,
        28605 => ISO_8859_15,
        38598 => ISO_8859_8_I,
        50220 => ISO_2022_JP,
        51932 => EUC_JP,
        54936 => GB18030,
        _ => return None,
    };
    Some(encoding)
}
