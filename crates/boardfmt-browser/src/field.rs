//! `TextField` implementation for `<textarea>` elements.
//!
//! The DOM reports selection offsets in UTF-16 code units; core works in
//! chars. Conversion happens here, on read and on write.

use boardfmt_core::{TextField, TextFieldState, char_to_utf16_offset, utf16_to_char_offset};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTextAreaElement};

/// A textarea seen through the `TextField` interface.
#[derive(Debug, Clone)]
pub struct TextareaField {
    element: HtmlTextAreaElement,
}

impl TextareaField {
    pub fn new(element: HtmlTextAreaElement) -> Self {
        Self { element }
    }

    /// Wrap an element if it is a textarea.
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlTextAreaElement>().ok().map(Self::new)
    }

    /// First textarea matching `selector` under `root`.
    pub fn find(root: &Element, selector: &str) -> Option<Self> {
        let element = root.query_selector(selector).ok().flatten()?;
        Self::from_element(element)
    }

    pub fn element(&self) -> &HtmlTextAreaElement {
        &self.element
    }
}

impl TextField for TextareaField {
    fn state(&self) -> TextFieldState {
        let value = self.element.value();
        let start = self.element.selection_start().ok().flatten().unwrap_or(0) as usize;
        let end = self
            .element
            .selection_end()
            .ok()
            .flatten()
            .map_or(start, |end| end as usize);

        TextFieldState {
            selection_start: utf16_to_char_offset(&value, start),
            selection_end: utf16_to_char_offset(&value, end),
            scroll_offset: self.element.scroll_top(),
            value,
        }
    }

    fn set_state(&mut self, state: &TextFieldState) {
        let start = char_to_utf16_offset(&state.value, state.selection_start) as u32;
        let end = char_to_utf16_offset(&state.value, state.selection_end) as u32;

        self.element.set_value(&state.value);
        if let Err(e) = self.element.set_selection_range(start, end) {
            tracing::warn!("set_selection_range failed: {:?}", e);
        }
        self.element.set_scroll_top(state.scroll_offset);
    }
}
