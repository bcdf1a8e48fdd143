//! Keyboard command parser.
//!
//! Parses human-readable strings like "Ctrl+Alt+Enter" into
//! [`KeyboardCommand`]s. A modifier followed by `?` ("Shift?+F3") may be
//! either up or down; modifiers that are not named must be released.

use crate::command::{ChordKey, KeyboardCommand, ModifierRequirement};
use std::fmt;
use winit::keyboard::NamedKey;

/// Error type for command parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`KeyboardCommand`] without an action.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
///
/// Each modifier may carry a `?` suffix meaning "don't care".
///
/// Keys:
/// - Single characters: `A`, `E`, `1`, etc.
/// - Named keys: `F1`-`F12`, `Enter`, `Escape`, `Space`, `Tab`, etc.
pub fn parse_keyboard_command<A>(s: &str) -> Result<KeyboardCommand<A>, ParseError> {
    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return Err(ParseError("Empty key combination".to_string()));
    };
    if key_part.is_empty() {
        return Err(ParseError(format!("No key specified in '{}'", s)));
    }

    let mut command = KeyboardCommand::new(parse_key(key_part)?);
    let mut seen = [false; 3];

    for part in modifier_parts {
        let (name, requirement) = match part.strip_suffix('?') {
            Some(name) => (name.trim(), ModifierRequirement::Ignored),
            None => (*part, ModifierRequirement::Pressed),
        };

        let slot = match name.to_lowercase().as_str() {
            "ctrl" | "control" => 0,
            "alt" | "option" => 1,
            "shift" => 2,
            "" => return Err(ParseError(format!("Empty modifier in '{}'", s))),
            _ => return Err(ParseError(format!("Unknown modifier: {}", name))),
        };
        if seen[slot] {
            return Err(ParseError(format!("Duplicate modifier '{}' in '{}'", name, s)));
        }
        seen[slot] = true;

        command = match slot {
            0 => command.ctrl(requirement),
            1 => command.alt(requirement),
            _ => command.shift(requirement),
        };
    }

    Ok(command)
}

/// Parse the key part of a command string.
fn parse_key(s: &str) -> Result<ChordKey, ParseError> {
    if let Some(named) = parse_named_key(s) {
        return Ok(ChordKey::Named(named));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(ChordKey::character(c)),
        _ => Err(ParseError(format!("Unknown key: {}", s))),
    }
}

/// Parse a named key string into a NamedKey.
fn parse_named_key(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        // Function keys
        "f1" => Some(NamedKey::F1),
        "f2" => Some(NamedKey::F2),
        "f3" => Some(NamedKey::F3),
        "f4" => Some(NamedKey::F4),
        "f5" => Some(NamedKey::F5),
        "f6" => Some(NamedKey::F6),
        "f7" => Some(NamedKey::F7),
        "f8" => Some(NamedKey::F8),
        "f9" => Some(NamedKey::F9),
        "f10" => Some(NamedKey::F10),
        "f11" => Some(NamedKey::F11),
        "f12" => Some(NamedKey::F12),

        // Common named keys
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        // Arrow keys
        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),

        _ => None,
    }
}
