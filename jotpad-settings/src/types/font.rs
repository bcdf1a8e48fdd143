//! Font configuration types and the effective-font resolver.

use serde::{Deserialize, Serialize};

/// Slant of the editor font.
///
/// Persisted by variant name (`"Normal"`, `"Oblique"`, `"Italic"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Oblique,
    Italic,
}

/// OpenType weight of the editor font (1..=999).
///
/// Persisted as a bare integer. Out-of-range integers are rejected on
/// deserialization so a corrupted entry falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontWeight(u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const SEMI_LIGHT: FontWeight = FontWeight(350);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
    pub const BLACK: FontWeight = FontWeight(900);
    pub const EXTRA_BLACK: FontWeight = FontWeight(950);

    /// Create a weight, returning `None` outside 1..=999.
    pub fn new(weight: u16) -> Option<Self> {
        (1..=999).contains(&weight).then_some(Self(weight))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(weight: u16) -> Result<Self, Self::Error> {
        Self::new(weight).ok_or_else(|| format!("font weight {weight} outside 1..=999"))
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.0
    }
}

/// One complete font choice: the default variant or the alternate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVariant {
    pub family: String,
    pub size: u32,
    pub style: FontStyle,
    pub weight: FontWeight,
}

/// Pick the font that is actually rendered.
///
/// Returns `alt` when `use_alt` is set, otherwise `default`. This is the only
/// place the toggle is interpreted; the effective font has no storage of its
/// own.
pub fn resolve_font<'a>(
    use_alt: bool,
    default: &'a FontVariant,
    alt: &'a FontVariant,
) -> &'a FontVariant {
    if use_alt { alt } else { default }
}
