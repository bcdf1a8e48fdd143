//! Text layout and editing preference types.

use serde::{Deserialize, Serialize};

/// Line terminator written for new documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LineEnding {
    /// `\r\n`
    #[default]
    Crlf,
    /// `\r`
    Cr,
    /// `\n`
    Lf,
}

/// Soft-wrap behaviour for new editor views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextWrapping {
    #[default]
    NoWrap,
    Wrap,
    WrapWholeWords,
}

/// Indentation inserted by the Tab key.
///
/// Persisted as `-1` for a literal tab character, or the number of spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum TabIndents {
    #[default]
    Tabs,
    Spaces(u8),
}

impl TryFrom<i32> for TabIndents {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(TabIndents::Tabs),
            n if n > 0 && n <= i32::from(u8::MAX) => Ok(TabIndents::Spaces(n as u8)),
            n => Err(format!("invalid tab indent width {n}")),
        }
    }
}

impl From<TabIndents> for i32 {
    fn from(indents: TabIndents) -> Self {
        match indents {
            TabIndents::Tabs => -1,
            TabIndents::Spaces(n) => i32::from(n),
        }
    }
}

/// Web search provider used by "Search with..." on selected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SearchEngine {
    #[default]
    Bing,
    Google,
    DuckDuckGo,
    /// Uses the user-supplied custom search URL.
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_ending_persisted_by_name() {
        assert_eq!(serde_json::to_value(LineEnding::Lf).unwrap(), json!("Lf"));
        let parsed: LineEnding = serde_json::from_value(json!("Cr")).unwrap();
        assert_eq!(parsed, LineEnding::Cr);
        assert!(serde_json::from_value::<LineEnding>(json!("Sideways")).is_err());
    }

    #[test]
    fn test_tab_indents_round_trip_values() {
        assert_eq!(i32::from(TabIndents::Tabs), -1);
        assert_eq!(TabIndents::try_from(4), Ok(TabIndents::Spaces(4)));
        assert!(TabIndents::try_from(0).is_err());
        assert!(TabIndents::try_from(-2).is_err());
        assert!(TabIndents::try_from(300).is_err());
    }

    #[test]
    fn test_tab_indents_json() {
        assert_eq!(serde_json::to_value(TabIndents::Spaces(2)).unwrap(), json!(2));
        let parsed: TabIndents = serde_json::from_value(json!(-1)).unwrap();
        assert_eq!(parsed, TabIndents::Tabs);
    }
}
