//! Keyboard command matching for jotpad.
//!
//! Components declare the chords they react to as [`KeyboardCommand`]s and
//! collect them in a [`KeyboardCommandTable`]. Incoming key events are
//! normalised into [`Chord`]s and classified against the table so the
//! component can tell its own commands from keys that belong to the
//! application.
//!
//! Features:
//! - Per-modifier requirements (pressed, released, don't care)
//! - Text definitions ("Ctrl+Alt+Enter", "Shift?+F3")
//! - First-match lookup in declaration order

pub mod command;
mod matcher;
pub mod parser;

pub use command::{ChordKey, KeyboardCommand, ModifierRequirement};
pub use matcher::{Chord, ChordModifiers};
pub use parser::{ParseError, parse_keyboard_command};

use std::fmt;

/// Outcome of classifying a chord against a command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordDisposition {
    /// The chord is one of the table's commands; the owning component keeps it.
    Native,
    /// Not a table command, but already consumed upstream.
    Handled,
    /// Not a table command and unhandled; forward it to the application.
    Forward,
}

/// Ordered list of keyboard commands.
///
/// Lookup returns the first command that hits, so declaration order decides
/// between overlapping commands.
#[derive(Debug, Clone)]
pub struct KeyboardCommandTable<A = ()> {
    commands: Vec<KeyboardCommand<A>>,
}

impl<A> Default for KeyboardCommandTable<A> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<A> KeyboardCommandTable<A> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: KeyboardCommand<A>) {
        self.commands.push(command);
    }

    /// Build a table from text definitions paired with actions.
    ///
    /// Invalid definitions are logged and skipped.
    pub fn from_definitions<I, S>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (S, A)>,
        S: AsRef<str>,
        A: fmt::Debug,
    {
        let mut table = Self::new();

        for (text, action) in definitions {
            let text = text.as_ref();
            match parser::parse_keyboard_command::<A>(text) {
                Ok(command) => {
                    log::debug!("Registered keyboard command: {} -> {:?}", command, action);
                    table.push(command.with_action(action));
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keyboard command '{}' for action {:?}: {}",
                        text,
                        action,
                        e
                    );
                }
            }
        }

        log::debug!("Keyboard command table holds {} commands", table.len());
        table
    }

    /// First command hit by `chord`, in declaration order.
    pub fn find(&self, chord: &Chord) -> Option<&KeyboardCommand<A>> {
        self.commands.iter().find(|command| command.hits(chord))
    }

    pub fn contains(&self, chord: &Chord) -> bool {
        self.find(chord).is_some()
    }

    /// Decide who owns `chord`.
    ///
    /// `already_handled` is the upstream handled flag of the key event.
    pub fn classify(&self, chord: &Chord, already_handled: bool) -> ChordDisposition {
        if self.contains(chord) {
            ChordDisposition::Native
        } else if already_handled {
            ChordDisposition::Handled
        } else {
            ChordDisposition::Forward
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyboardCommand<A>> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl<A> FromIterator<KeyboardCommand<A>> for KeyboardCommandTable<A> {
    fn from_iter<T: IntoIterator<Item = KeyboardCommand<A>>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
