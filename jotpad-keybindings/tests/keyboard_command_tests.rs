//! Integration tests for jotpad-keybindings.
//!
//! These tests exercise the full parse → table → classify pipeline.
//! `winit::KeyEvent` has private fields, so chords are built either directly
//! or through `Chord::from_key` with an explicit modifier state.

use jotpad_keybindings::{
    Chord, ChordDisposition, ChordKey, KeyboardCommand, KeyboardCommandTable, ModifierRequirement,
    parse_keyboard_command,
};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

#[test]
fn table_from_empty_definitions() {
    let table = KeyboardCommandTable::<&str>::from_definitions(Vec::<(&str, &str)>::new());
    assert!(table.is_empty());
}

#[test]
fn table_keeps_declaration_order() {
    let table = KeyboardCommandTable::from_definitions([
        ("F3", 1),
        ("Shift+F3", 2),
        ("Alt+E", 3),
    ]);
    let actions: Vec<_> = table.iter().filter_map(|c| c.action).collect();
    assert_eq!(actions, vec![1, 2, 3]);
}

#[test]
fn table_counts_only_valid_definitions() {
    let table = KeyboardCommandTable::from_definitions([
        ("Ctrl+Alt+Enter", "replace_all"),
        ("Ctrl+", "missing key"),
        ("Meta+Q", "unknown modifier"),
        ("NotAKey", "unknown key"),
    ]);
    assert_eq!(table.len(), 1);
}

// ---------------------------------------------------------------------------
// Matching through winit key types
// ---------------------------------------------------------------------------

#[test]
fn parsed_command_hits_winit_chord() {
    let command: KeyboardCommand = parse_keyboard_command("Ctrl+Alt+Enter").unwrap();
    let state = ModifiersState::CONTROL | ModifiersState::ALT;
    let chord = Chord::from_key(&Key::Named(NamedKey::Enter), state).unwrap();
    assert!(command.hits(&chord));

    let with_shift = Chord::from_key(
        &Key::Named(NamedKey::Enter),
        state | ModifiersState::SHIFT,
    )
    .unwrap();
    assert!(!command.hits(&with_shift));
}

#[test]
fn lowercase_character_event_hits_uppercase_definition() {
    let command: KeyboardCommand = parse_keyboard_command("Alt+R").unwrap();
    let chord = Chord::from_key(&Key::Character("r".into()), ModifiersState::ALT).unwrap();
    assert_eq!(chord.key, ChordKey::Character('R'));
    assert!(command.hits(&chord));
}

#[test]
fn dont_care_shift_hits_both_states() {
    let command: KeyboardCommand = parse_keyboard_command("Shift?+F3").unwrap();
    assert_eq!(command.shift, ModifierRequirement::Ignored);
    assert!(command.hits(&Chord::new(NamedKey::F3)));
    assert!(command.hits(&Chord::new(NamedKey::F3).with_shift()));
    assert!(!command.hits(&Chord::new(NamedKey::F3).with_alt()));
}

#[test]
fn option_composed_characters_hit_by_key_position() {
    let table = KeyboardCommandTable::from_definitions([("Alt+E", "replace"), ("Alt+W", "wrap")]);

    // macOS Option+E is a dead key; Option+W composes a character.
    let dead = Chord::from_keys(
        &Key::Dead(Some('´')),
        PhysicalKey::Code(KeyCode::KeyE),
        ModifiersState::ALT,
    )
    .unwrap();
    let composed = Chord::from_keys(
        &Key::Character("∑".into()),
        PhysicalKey::Code(KeyCode::KeyW),
        ModifiersState::ALT,
    )
    .unwrap();

    assert_eq!(table.find(&dead).and_then(|c| c.action), Some("replace"));
    assert_eq!(table.find(&composed).and_then(|c| c.action), Some("wrap"));
    assert_eq!(table.classify(&composed, false), ChordDisposition::Native);
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn classify_prefers_native_over_handled_flag() {
    let table: KeyboardCommandTable = ["F3", "Alt+W"]
        .into_iter()
        .filter_map(|text| parse_keyboard_command(text).ok())
        .collect();

    let alt_w = Chord::new('w').with_alt();
    assert_eq!(table.classify(&alt_w, true), ChordDisposition::Native);
    assert_eq!(table.classify(&alt_w, false), ChordDisposition::Native);

    let ctrl_alt_w = Chord::new('w').with_alt().with_ctrl();
    assert_eq!(table.classify(&ctrl_alt_w, true), ChordDisposition::Handled);
    assert_eq!(table.classify(&ctrl_alt_w, false), ChordDisposition::Forward);
}
