//! Chords the find control keeps for itself.

use jotpad_keybindings::{KeyboardCommand, KeyboardCommandTable, ModifierRequirement};
use winit::keyboard::NamedKey;

/// The find control's native commands, in lookup order:
/// F3, Shift+F3, Alt+E, Alt+R, Alt+W, Ctrl+Alt+Enter.
///
/// Modifiers a command does not name must be released.
pub fn native_commands() -> KeyboardCommandTable {
    use ModifierRequirement::Pressed;

    [
        KeyboardCommand::new(NamedKey::F3),
        KeyboardCommand::new(NamedKey::F3).shift(Pressed),
        KeyboardCommand::new('E').alt(Pressed),
        KeyboardCommand::new('R').alt(Pressed),
        KeyboardCommand::new('W').alt(Pressed),
        KeyboardCommand::new(NamedKey::Enter)
            .ctrl(Pressed)
            .alt(Pressed),
    ]
    .into_iter()
    .collect()
}
