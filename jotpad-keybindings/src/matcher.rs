//! Key event normalisation.
//!
//! Converts winit key events into [`Chord`]s that commands are matched
//! against. Character keys are upper-cased so `Alt+e` and `Alt+E` agree.
//!
//! A chord also remembers the physical key position. Layouts where Alt
//! (Option on macOS) composes characters report `Alt+E` as `´` or `€`, so
//! character commands fall back to the US QWERTY position of the key.

use crate::command::ChordKey;
use std::fmt;
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, KeyCode, ModifiersState, PhysicalKey};

/// Observed down-state of the modifiers commands care about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChordModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<ModifiersState> for ChordModifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
        }
    }
}

/// Modifier states plus a single key, evaluated as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: ChordModifiers,
    pub key: ChordKey,
    /// Physical key position, when the platform reported one.
    pub physical: Option<KeyCode>,
}

impl Chord {
    /// Chord with no modifiers held.
    pub fn new(key: impl Into<ChordKey>) -> Self {
        Self {
            modifiers: ChordModifiers::default(),
            key: key.into(),
            physical: None,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_physical(mut self, code: KeyCode) -> Self {
        self.physical = Some(code);
        self
    }

    /// Build a chord from a winit key event.
    ///
    /// Returns `None` when neither the logical key nor the key's position
    /// names a chord key.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Option<Self> {
        Self::from_keys(&event.logical_key, event.physical_key, modifiers.state())
    }

    /// Build a chord from a logical key and modifier state.
    pub fn from_key(key: &Key, state: ModifiersState) -> Option<Self> {
        Some(Self {
            modifiers: state.into(),
            key: logical_chord_key(key)?,
            physical: None,
        })
    }

    /// Build a chord from both the logical and the physical key.
    ///
    /// A dead key (macOS Option+E, for one) has no logical character, so the
    /// chord takes the character printed at its physical position instead.
    pub fn from_keys(key: &Key, physical: PhysicalKey, state: ModifiersState) -> Option<Self> {
        let physical = match physical {
            PhysicalKey::Code(code) => Some(code),
            PhysicalKey::Unidentified(_) => None,
        };
        let key = match logical_chord_key(key) {
            Some(key) => key,
            None => ChordKey::Character(physical.and_then(physical_key_char)?),
        };

        Some(Self {
            modifiers: state.into(),
            key,
            physical,
        })
    }

    /// Whether the physical key sits where `ch` is on a US QWERTY layout.
    pub(crate) fn physical_matches(&self, ch: char) -> bool {
        self.physical
            .and_then(physical_key_char)
            .is_some_and(|expected| expected.eq_ignore_ascii_case(&ch))
    }
}

fn logical_chord_key(key: &Key) -> Option<ChordKey> {
    match key {
        // First character only, upper-cased for case-insensitive matching
        Key::Character(c) => c.chars().next().map(ChordKey::character),
        Key::Named(named) => Some(ChordKey::Named(*named)),
        _ => None,
    }
}

/// Character produced by a physical key on a US QWERTY keyboard.
fn physical_key_char(code: KeyCode) -> Option<char> {
    let ch = match code {
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        _ => return None,
    };
    Some(ch)
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NamedKey;

    #[test]
    fn test_from_key_character_uppercased() {
        let chord = Chord::from_key(&Key::Character("e".into()), ModifiersState::ALT).unwrap();
        assert_eq!(chord.key, ChordKey::Character('E'));
        assert!(chord.modifiers.alt);
        assert!(!chord.modifiers.ctrl);
        assert!(!chord.modifiers.shift);
    }

    #[test]
    fn test_from_key_named() {
        let state = ModifiersState::CONTROL | ModifiersState::ALT;
        let chord = Chord::from_key(&Key::Named(NamedKey::Enter), state).unwrap();
        assert_eq!(chord, Chord::new(NamedKey::Enter).with_ctrl().with_alt());
    }

    #[test]
    fn test_from_key_super_is_not_tracked() {
        let chord = Chord::from_key(&Key::Named(NamedKey::F3), ModifiersState::SUPER).unwrap();
        assert_eq!(chord, Chord::new(NamedKey::F3));
    }

    #[test]
    fn test_from_key_dead_key_is_none() {
        assert!(Chord::from_key(&Key::Dead(Some('`')), ModifiersState::empty()).is_none());
    }

    #[test]
    fn test_from_keys_dead_key_uses_position() {
        let chord = Chord::from_keys(
            &Key::Dead(Some('´')),
            PhysicalKey::Code(KeyCode::KeyE),
            ModifiersState::ALT,
        )
        .unwrap();
        assert_eq!(chord, Chord::new('e').with_alt().with_physical(KeyCode::KeyE));
    }

    #[test]
    fn test_from_keys_keeps_composed_character() {
        let chord = Chord::from_keys(
            &Key::Character("€".into()),
            PhysicalKey::Code(KeyCode::KeyE),
            ModifiersState::ALT,
        )
        .unwrap();
        assert_eq!(chord.key, ChordKey::Character('€'));
        assert_eq!(chord.physical, Some(KeyCode::KeyE));
        assert!(chord.physical_matches('e'));
        assert!(!chord.physical_matches('W'));
    }

    #[test]
    fn test_from_keys_dead_key_without_position_is_none() {
        let unknown = PhysicalKey::Code(KeyCode::F35);
        assert!(Chord::from_keys(&Key::Dead(None), unknown, ModifiersState::ALT).is_none());
    }

    #[test]
    fn test_display() {
        let chord = Chord::new(NamedKey::F3).with_shift();
        assert_eq!(chord.to_string(), "Shift+F3");
        assert_eq!(Chord::new('a').with_ctrl().to_string(), "Ctrl+A");
    }
}
