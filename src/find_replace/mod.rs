//! Find and replace control.
//!
//! This module holds the view-model behind the editor's find/replace bar:
//! the find and replace text, the search toggles, button enablement, key
//! handling for both text boxes, and the requests it raises for the search
//! engine. The view layer forwards its input here and renders the state
//! back; results leave through [`FindReplaceController::events`].

mod shortcuts;
pub mod types;

pub use shortcuts::native_commands;
pub use types::{
    FindAndReplaceMode, FindAndReplaceRequest, SearchContext, SearchDirection, SearchError,
};

use jotpad_keybindings::{Chord, ChordDisposition, ChordKey, KeyboardCommandTable};
use jotpad_settings::EventChannel;
use std::sync::mpsc::{self, Receiver, Sender};
use winit::keyboard::NamedKey;

/// Outbound notifications raised by the control.
#[derive(Debug, Clone, PartialEq)]
pub enum FindReplaceEvent {
    /// The user asked to close the control.
    Dismiss,
    /// Run a find or replace.
    FindAndReplace(FindAndReplaceRequest),
    /// Show (`true`) or hide (`false`) the replace bar.
    ToggleReplaceMode(bool),
    /// A key the control does not own; the application should handle it.
    ForwardKey(Chord),
}

/// One of the control's two text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    FindBar,
    ReplaceBar,
}

/// Enabled state of the action buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStates {
    pub search_forward: bool,
    pub search_backward: bool,
    pub replace: bool,
    pub replace_all: bool,
}

/// What the view should do after a key went to one of the text boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyHandling {
    /// Stop the key from reaching the text box.
    pub handled: bool,
    /// Move focus to this bar.
    pub focus: Option<FocusTarget>,
}

/// Selection inside a text box, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSelection {
    pub start: usize,
    pub length: usize,
}

impl TextSelection {
    fn all(text: &str) -> Self {
        Self {
            start: 0,
            length: text.chars().count(),
        }
    }

    fn caret_at_end(text: &str) -> Self {
        Self {
            start: text.chars().count(),
            length: 0,
        }
    }
}

/// RGBA colour used for the text selection highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AccentColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// `Send` handle for reporting accent colour changes from any thread.
///
/// Colours are queued until the owning thread calls
/// [`FindReplaceController::pump_ui_messages`].
#[derive(Debug, Clone)]
pub struct AccentSender {
    tx: Sender<AccentColor>,
}

impl AccentSender {
    /// Queue `color`. Returns false once the controller is gone.
    pub fn send(&self, color: AccentColor) -> bool {
        self.tx.send(color).is_ok()
    }
}

#[derive(Debug, Default)]
struct TextBar {
    text: String,
    selection: TextSelection,
}

impl TextBar {
    fn set_text(&mut self, text: String) {
        self.selection = TextSelection::caret_at_end(&text);
        self.text = text;
    }
}

/// View-model for the find/replace control.
pub struct FindReplaceController {
    /// Find text box
    find_bar: TextBar,
    /// Replace text box
    replace_bar: TextBar,
    /// Search toggles; `None` is the indeterminate state and counts as off
    match_case: Option<bool>,
    match_whole_word: Option<bool>,
    use_regex: Option<bool>,
    /// Whether the replace row is shown.
    replace_bar_visible: bool,
    buttons: ButtonStates,
    /// Set when Enter triggered a search so losing focus keeps the selection.
    enter_pressed: bool,
    /// False while a text box has focus; external search strings are ignored then.
    should_update_search_string: bool,
    focused: Option<FocusTarget>,
    native_commands: KeyboardCommandTable,
    selection_highlight: AccentColor,
    accent_tx: Sender<AccentColor>,
    accent_rx: Receiver<AccentColor>,
    events: EventChannel<FindReplaceEvent>,
}

impl FindReplaceController {
    /// Create a controller highlighting selections with `accent`.
    pub fn new(accent: AccentColor) -> Self {
        let (accent_tx, accent_rx) = mpsc::channel();
        Self {
            find_bar: TextBar::default(),
            replace_bar: TextBar::default(),
            match_case: Some(false),
            match_whole_word: Some(false),
            use_regex: Some(false),
            replace_bar_visible: false,
            buttons: ButtonStates::default(),
            enter_pressed: false,
            should_update_search_string: true,
            focused: None,
            native_commands: native_commands(),
            selection_highlight: accent,
            accent_tx,
            accent_rx,
            events: EventChannel::new(),
        }
    }

    /// Outbound event channel.
    pub fn events(&self) -> &EventChannel<FindReplaceEvent> {
        &self.events
    }

    /// Snapshot the find text and toggles.
    pub fn search_context(&self) -> SearchContext {
        SearchContext::build(
            self.find_bar.text.as_str(),
            self.match_case.unwrap_or(false),
            self.match_whole_word.unwrap_or(false),
            self.use_regex.unwrap_or(false),
        )
    }

    /// Bring the control into focus, optionally seeding the find text.
    ///
    /// `search_string` replaces the find text only when it is non-empty and
    /// no text box currently holds focus. Returns the bar the view should
    /// focus.
    pub fn focus(&mut self, search_string: &str, mode: FindAndReplaceMode) -> FocusTarget {
        if self.should_update_search_string && !search_string.is_empty() {
            self.find_bar.set_text(search_string.to_string());
        }
        self.refresh_buttons();

        match mode {
            FindAndReplaceMode::FindOnly => FocusTarget::FindBar,
            FindAndReplaceMode::Replace | FindAndReplaceMode::ReplaceAll => {
                FocusTarget::ReplaceBar
            }
        }
    }

    pub fn find_text(&self) -> &str {
        &self.find_bar.text
    }

    pub fn set_find_text(&mut self, text: impl Into<String>) {
        self.find_bar.set_text(text.into());
        self.refresh_buttons();
    }

    pub fn replace_text(&self) -> &str {
        &self.replace_bar.text
    }

    pub fn set_replace_text(&mut self, text: impl Into<String>) {
        self.replace_bar.set_text(text.into());
    }

    pub fn match_case(&self) -> Option<bool> {
        self.match_case
    }

    pub fn set_match_case(&mut self, checked: Option<bool>) {
        self.match_case = checked;
    }

    pub fn match_whole_word(&self) -> Option<bool> {
        self.match_whole_word
    }

    pub fn set_match_whole_word(&mut self, checked: Option<bool>) {
        self.match_whole_word = checked;
    }

    pub fn use_regex(&self) -> Option<bool> {
        self.use_regex
    }

    pub fn set_use_regex(&mut self, checked: Option<bool>) {
        self.use_regex = checked;
    }

    pub fn is_replace_bar_visible(&self) -> bool {
        self.replace_bar_visible
    }

    /// Show or hide the replace row.
    pub fn show_replace_bar(&mut self, show: bool) {
        self.replace_bar_visible = show;
        self.refresh_buttons();
    }

    pub fn button_states(&self) -> ButtonStates {
        self.buttons
    }

    /// Selection of `bar`, in characters.
    pub fn selection(&self, bar: FocusTarget) -> TextSelection {
        self.bar(bar).selection
    }

    pub fn focused_bar(&self) -> Option<FocusTarget> {
        self.focused
    }

    /// Whether the last key in a text box was Enter.
    pub fn enter_pressed(&self) -> bool {
        self.enter_pressed
    }

    /// Whether [`focus`](Self::focus) may overwrite the find text.
    pub fn accepts_search_string(&self) -> bool {
        self.should_update_search_string
    }

    pub fn search_forward(&self) {
        self.request(FindAndReplaceRequest::find(
            self.search_context(),
            SearchDirection::Next,
        ));
    }

    pub fn search_backward(&self) {
        self.request(FindAndReplaceRequest::find(
            self.search_context(),
            SearchDirection::Previous,
        ));
    }

    /// Replace the next match.
    pub fn replace(&self) {
        self.replace_in(SearchDirection::Next);
    }

    pub fn replace_all(&self) {
        self.request(FindAndReplaceRequest::replace_all(
            self.search_context(),
            self.replace_bar.text.as_str(),
        ));
    }

    pub fn dismiss(&self) {
        debug_log!("FIND", "Dismissed");
        self.events.emit(&FindReplaceEvent::Dismiss);
    }

    /// Ask the host to flip the replace bar's visibility.
    pub fn toggle_replace_mode(&mut self) {
        self.should_update_search_string = false;
        let show = !self.replace_bar_visible;
        debug_log!("FIND", "Requesting replace bar visible={}", show);
        self.events.emit(&FindReplaceEvent::ToggleReplaceMode(show));
    }

    /// Key pressed inside the find text box.
    ///
    /// Enter searches forward (backward with Shift) when there is find text.
    /// Tab is swallowed and moves to the replace bar if it is visible.
    pub fn find_bar_key_down(&mut self, chord: &Chord) -> KeyHandling {
        match chord.key {
            ChordKey::Named(NamedKey::Enter) if !self.find_bar.text.is_empty() => {
                self.enter_pressed = true;
                if chord.modifiers.shift {
                    self.search_backward();
                } else {
                    self.search_forward();
                }
                KeyHandling::default()
            }
            ChordKey::Named(NamedKey::Tab) => self.tab_to(FocusTarget::ReplaceBar),
            _ => KeyHandling::default(),
        }
    }

    /// Key pressed inside the replace text box.
    ///
    /// Enter replaces the next match (previous with Shift) when there is
    /// find text. Tab is swallowed and moves back to the find bar if the
    /// replace bar is visible.
    pub fn replace_bar_key_down(&mut self, chord: &Chord) -> KeyHandling {
        match chord.key {
            ChordKey::Named(NamedKey::Enter) if !self.find_bar.text.is_empty() => {
                self.enter_pressed = true;
                if chord.modifiers.shift {
                    self.replace_in(SearchDirection::Previous);
                } else {
                    self.replace();
                }
                KeyHandling::default()
            }
            ChordKey::Named(NamedKey::Tab) => self.tab_to(FocusTarget::FindBar),
            _ => KeyHandling::default(),
        }
    }

    pub fn find_bar_got_focus(&mut self) {
        self.got_focus(FocusTarget::FindBar);
    }

    pub fn find_bar_lost_focus(&mut self) {
        self.lost_focus(FocusTarget::FindBar);
    }

    pub fn replace_bar_got_focus(&mut self) {
        self.got_focus(FocusTarget::ReplaceBar);
    }

    pub fn replace_bar_lost_focus(&mut self) {
        self.lost_focus(FocusTarget::ReplaceBar);
    }

    /// Key event that bubbled up to the control's root.
    ///
    /// Native commands stay with the control; anything else not already
    /// handled is forwarded to the application.
    pub fn root_key_down(&self, chord: &Chord, handled: bool) -> ChordDisposition {
        let disposition = self.native_commands.classify(chord, handled);
        if disposition == ChordDisposition::Forward {
            debug_trace!("FIND", "Forwarding key {}", chord);
            self.events.emit(&FindReplaceEvent::ForwardKey(*chord));
        }
        disposition
    }

    /// Handle for reporting accent colour changes from other threads.
    pub fn accent_sender(&self) -> AccentSender {
        AccentSender {
            tx: self.accent_tx.clone(),
        }
    }

    /// Apply queued accent colours. Call on the thread that owns the
    /// controller; only the most recent colour takes effect.
    ///
    /// Returns the number of queued colours drained.
    pub fn pump_ui_messages(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(color) = self.accent_rx.try_recv() {
            self.selection_highlight = color;
            drained += 1;
        }
        if drained > 0 {
            debug_log!(
                "FIND",
                "Selection highlight set to {:?} ({} updates)",
                self.selection_highlight,
                drained
            );
        }
        drained
    }

    /// Colour used for selections in both text boxes, focused or not.
    pub fn selection_highlight(&self) -> AccentColor {
        self.selection_highlight
    }

    fn request(&self, request: FindAndReplaceRequest) {
        debug_log!(
            "FIND",
            "Request: {:?} {:?}",
            request.mode(),
            request.direction()
        );
        self.events.emit(&FindReplaceEvent::FindAndReplace(request));
    }

    fn replace_in(&self, direction: SearchDirection) {
        self.request(FindAndReplaceRequest::replace(
            self.search_context(),
            self.replace_bar.text.as_str(),
            direction,
        ));
    }

    fn tab_to(&self, target: FocusTarget) -> KeyHandling {
        KeyHandling {
            handled: true,
            focus: self.replace_bar_visible.then_some(target),
        }
    }

    fn got_focus(&mut self, target: FocusTarget) {
        self.enter_pressed = false;
        self.should_update_search_string = false;
        self.focused = Some(target);
        let bar = self.bar_mut(target);
        bar.selection = TextSelection::all(&bar.text);
    }

    fn lost_focus(&mut self, target: FocusTarget) {
        self.should_update_search_string = true;
        if self.focused == Some(target) {
            self.focused = None;
        }
        if self.enter_pressed {
            return;
        }
        let bar = self.bar_mut(target);
        bar.selection = TextSelection::caret_at_end(&bar.text);
    }

    fn refresh_buttons(&mut self) {
        let has_text = !self.find_bar.text.is_empty();
        let can_replace = has_text && self.replace_bar_visible;
        self.buttons = ButtonStates {
            search_forward: has_text,
            search_backward: has_text,
            replace: can_replace,
            replace_all: can_replace,
        };
    }

    fn bar(&self, target: FocusTarget) -> &TextBar {
        match target {
            FocusTarget::FindBar => &self.find_bar,
            FocusTarget::ReplaceBar => &self.replace_bar,
        }
    }

    fn bar_mut(&mut self, target: FocusTarget) -> &mut TextBar {
        match target {
            FocusTarget::FindBar => &mut self.find_bar,
            FocusTarget::ReplaceBar => &mut self.replace_bar,
        }
    }
}
