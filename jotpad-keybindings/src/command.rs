//! Keyboard command definitions.
//!
//! A [`KeyboardCommand`] states, per modifier, whether it must be held,
//! must be released, or does not matter, plus the key that triggers it.

use crate::matcher::Chord;
use std::fmt;
use winit::keyboard::NamedKey;

/// What a command requires of a single modifier key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModifierRequirement {
    /// The modifier must be up.
    #[default]
    Released,
    /// The modifier must be down.
    Pressed,
    /// Either state matches.
    Ignored,
}

impl ModifierRequirement {
    /// Whether an observed modifier state satisfies this requirement.
    pub fn accepts(self, down: bool) -> bool {
        match self {
            Self::Released => !down,
            Self::Pressed => down,
            Self::Ignored => true,
        }
    }
}

/// The non-modifier key of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKey {
    /// A character key, stored upper-cased for case-insensitive matching
    Character(char),
    /// A named key (F3, Enter, Tab, ...)
    Named(NamedKey),
}

impl ChordKey {
    /// Character key, normalised to upper case.
    pub fn character(c: char) -> Self {
        Self::Character(c.to_ascii_uppercase())
    }
}

impl From<NamedKey> for ChordKey {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

impl From<char> for ChordKey {
    fn from(c: char) -> Self {
        Self::character(c)
    }
}

impl fmt::Display for ChordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(c) => write!(f, "{}", c),
            Self::Named(n) => write!(f, "{:?}", n),
        }
    }
}

/// A keyboard chord a component reacts to.
///
/// `action` is an optional marker for tables that dispatch on the hit; the
/// find control's native commands carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardCommand<A = ()> {
    pub ctrl: ModifierRequirement,
    pub alt: ModifierRequirement,
    pub shift: ModifierRequirement,
    pub key: ChordKey,
    pub action: Option<A>,
}

impl<A> KeyboardCommand<A> {
    /// Command for `key` with every modifier required to be released.
    pub fn new(key: impl Into<ChordKey>) -> Self {
        Self {
            ctrl: ModifierRequirement::Released,
            alt: ModifierRequirement::Released,
            shift: ModifierRequirement::Released,
            key: key.into(),
            action: None,
        }
    }

    pub fn ctrl(mut self, requirement: ModifierRequirement) -> Self {
        self.ctrl = requirement;
        self
    }

    pub fn alt(mut self, requirement: ModifierRequirement) -> Self {
        self.alt = requirement;
        self
    }

    pub fn shift(mut self, requirement: ModifierRequirement) -> Self {
        self.shift = requirement;
        self
    }

    pub fn with_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Whether `chord` triggers this command.
    ///
    /// Every modifier requirement must accept the observed state and the key
    /// must be the same key. A character command also hits a chord whose
    /// layout composed a non-ASCII character at the command key's position.
    pub fn hits(&self, chord: &Chord) -> bool {
        self.ctrl.accepts(chord.modifiers.ctrl)
            && self.alt.accepts(chord.modifiers.alt)
            && self.shift.accepts(chord.modifiers.shift)
            && self.key_matches(chord)
    }

    fn key_matches(&self, chord: &Chord) -> bool {
        if self.key == chord.key {
            return true;
        }
        match (self.key, chord.key) {
            (ChordKey::Character(want), ChordKey::Character(got)) if !got.is_ascii() => {
                chord.physical_matches(want)
            }
            _ => false,
        }
    }
}

impl<A> fmt::Display for KeyboardCommand<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for (name, requirement) in [
            ("Ctrl", self.ctrl),
            ("Alt", self.alt),
            ("Shift", self.shift),
        ] {
            match requirement {
                ModifierRequirement::Pressed => parts.push(name.to_string()),
                ModifierRequirement::Ignored => parts.push(format!("{}?", name)),
                ModifierRequirement::Released => {}
            }
        }
        parts.push(self.key.to_string());

        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ChordModifiers;
    use winit::keyboard::KeyCode;

    fn chord(ctrl: bool, alt: bool, shift: bool, key: ChordKey) -> Chord {
        Chord {
            modifiers: ChordModifiers { ctrl, alt, shift },
            key,
            physical: None,
        }
    }

    #[test]
    fn test_requirement_accepts() {
        assert!(ModifierRequirement::Released.accepts(false));
        assert!(!ModifierRequirement::Released.accepts(true));
        assert!(ModifierRequirement::Pressed.accepts(true));
        assert!(!ModifierRequirement::Pressed.accepts(false));
        assert!(ModifierRequirement::Ignored.accepts(true));
        assert!(ModifierRequirement::Ignored.accepts(false));
    }

    #[test]
    fn test_hits_exact_modifiers() {
        let command: KeyboardCommand = KeyboardCommand::new(NamedKey::Enter)
            .ctrl(ModifierRequirement::Pressed)
            .alt(ModifierRequirement::Pressed);

        assert!(command.hits(&chord(true, true, false, NamedKey::Enter.into())));
        assert!(!command.hits(&chord(true, true, true, NamedKey::Enter.into())));
        assert!(!command.hits(&chord(true, false, false, NamedKey::Enter.into())));
        assert!(!command.hits(&chord(true, true, false, NamedKey::Tab.into())));
    }

    #[test]
    fn test_hits_ignored_modifier() {
        let command: KeyboardCommand =
            KeyboardCommand::new(NamedKey::F3).shift(ModifierRequirement::Ignored);

        assert!(command.hits(&chord(false, false, false, NamedKey::F3.into())));
        assert!(command.hits(&chord(false, false, true, NamedKey::F3.into())));
        assert!(!command.hits(&chord(true, false, false, NamedKey::F3.into())));
    }

    #[test]
    fn test_character_key_is_case_insensitive() {
        let command: KeyboardCommand =
            KeyboardCommand::new('e').alt(ModifierRequirement::Pressed);
        assert_eq!(command.key, ChordKey::Character('E'));
        assert!(command.hits(&chord(false, true, false, ChordKey::character('e'))));
    }

    #[test]
    fn test_composed_character_hits_by_position() {
        let command: KeyboardCommand =
            KeyboardCommand::new('e').alt(ModifierRequirement::Pressed);

        let composed = chord(false, true, false, ChordKey::Character('€'));
        assert!(!command.hits(&composed));
        assert!(command.hits(&composed.with_physical(KeyCode::KeyE)));
        assert!(!command.hits(&composed.with_physical(KeyCode::KeyR)));
    }

    #[test]
    fn test_ascii_character_ignores_position() {
        // AZERTY: the key labelled A sits at the QWERTY Q position.
        let command: KeyboardCommand =
            KeyboardCommand::new('q').alt(ModifierRequirement::Pressed);
        let azerty_a = chord(false, true, false, ChordKey::character('a'))
            .with_physical(KeyCode::KeyQ);
        assert!(!command.hits(&azerty_a));
    }

    #[test]
    fn test_display() {
        let command: KeyboardCommand = KeyboardCommand::new(NamedKey::F3)
            .ctrl(ModifierRequirement::Pressed)
            .shift(ModifierRequirement::Ignored);
        assert_eq!(command.to_string(), "Ctrl+Shift?+F3");

        let plain: KeyboardCommand = KeyboardCommand::new('w').alt(ModifierRequirement::Pressed);
        assert_eq!(plain.to_string(), "Alt+W");
    }

    #[test]
    fn test_with_action() {
        let command = KeyboardCommand::new(NamedKey::F3).with_action("search");
        assert_eq!(command.action, Some("search"));
    }
}
