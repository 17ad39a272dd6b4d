//! Text field state and the host-field abstraction.
//!
//! The formatter never talks to a widget directly. A host exposes its text,
//! selection and scroll position through `TextField`; the formatter reads the
//! state once, computes, and writes it back once.

/// Snapshot of an editable text field.
///
/// Selection offsets count Unicode scalar values (chars), not bytes or UTF-16
/// code units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFieldState {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
    /// Vertical scroll position, restored unchanged after formatting.
    pub scroll_offset: i32,
}

impl TextFieldState {
    /// A field with the caret at the end of `value`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let len = value.chars().count();
        Self {
            value,
            selection_start: len,
            selection_end: len,
            scroll_offset: 0,
        }
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.selection_start = start;
        self.selection_end = end;
        self
    }

    pub fn with_caret(self, offset: usize) -> Self {
        self.with_selection(offset, offset)
    }

    pub fn with_scroll_offset(mut self, scroll_offset: i32) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    /// Length of the value in chars.
    pub fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// No text highlighted, just a caret.
    pub fn is_caret(&self) -> bool {
        self.selection_start == self.selection_end
    }

    /// Selection bounds clamped to the text and ordered so start <= end.
    pub fn clamped_selection(&self) -> (usize, usize) {
        let len = self.len_chars();
        let a = self.selection_start.min(len);
        let b = self.selection_end.min(len);
        (a.min(b), a.max(b))
    }

    /// The selected text, after clamping.
    pub fn selected_text(&self) -> &str {
        let (start, end) = self.clamped_selection();
        let start = char_to_byte(&self.value, start);
        let end = char_to_byte(&self.value, end);
        &self.value[start..end]
    }
}

/// A host text input the formatter can read and rewrite.
pub trait TextField {
    /// Read the current value, selection and scroll position.
    fn state(&self) -> TextFieldState;

    /// Replace value, selection and scroll position in one step.
    fn set_state(&mut self, state: &TextFieldState);
}

/// In-memory `TextField`, for tests and non-DOM hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    state: TextFieldState,
}

impl MemoryField {
    pub fn new(state: TextFieldState) -> Self {
        Self { state }
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn into_state(self) -> TextFieldState {
        self.state
    }
}

impl TextField for MemoryField {
    fn state(&self) -> TextFieldState {
        self.state.clone()
    }

    fn set_state(&mut self, state: &TextFieldState) {
        self.state = state.clone();
    }
}

impl From<TextFieldState> for MemoryField {
    fn from(state: TextFieldState) -> Self {
        Self::new(state)
    }
}

/// Byte index of the char at `char_offset`, or `text.len()` past the end.
pub(crate) fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(i, _)| i)
}
