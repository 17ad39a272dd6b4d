//! Types exposed to JavaScript via wasm-bindgen.

use boardfmt_core::{
    FormatDescriptor, FormatEntry, TextFieldState, char_to_utf16_offset, utf16_to_char_offset,
};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Options for `installFormattingTools`.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct InstallOptions {
    /// Board identifier, e.g. `"tech"`.
    pub board: String,
    /// Page kind: `"thread"`, `"index"`, `"catalog"`, ...
    pub active_page: String,
    /// Defaults to `location.host`.
    #[tsify(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Replaces the built-in format table.
    #[tsify(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<JsFormatEntry>>,
}

/// A toolbar entry, flattened for JS.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsFormatEntry {
    pub name: String,
    pub display_text: String,
    #[tsify(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub prefix: String,
    pub suffix: String,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default)]
    pub exclusive_line: bool,
    /// Single character, bound to `ctrl+key`.
    #[tsify(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_key: Option<String>,
}

impl TryFrom<JsFormatEntry> for FormatEntry {
    type Error = JsError;

    fn try_from(js: JsFormatEntry) -> Result<Self, Self::Error> {
        let options = FormatDescriptor {
            prefix: js.prefix,
            suffix: js.suffix,
            multiline: js.multiline,
            exclusive_line: js.exclusive_line,
        };
        let mut entry = FormatEntry::new(js.name, js.display_text, options);
        entry.alt_text = js.alt_text.map(Into::into);

        if let Some(key) = js.shortcut_key {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => entry.shortcut_key = Some(c),
                _ => {
                    return Err(JsError::new(&format!(
                        "Invalid shortcut key {:?} for format '{}'",
                        key, entry.name
                    )));
                }
            }
        }

        Ok(entry)
    }
}

impl From<&FormatEntry> for JsFormatEntry {
    fn from(entry: &FormatEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            display_text: entry.display_text.to_string(),
            alt_text: entry.alt_text.as_ref().map(ToString::to_string),
            prefix: entry.options.prefix.clone(),
            suffix: entry.options.suffix.clone(),
            multiline: entry.options.multiline,
            exclusive_line: entry.options.exclusive_line,
            shortcut_key: entry.shortcut_key.map(String::from),
        }
    }
}

/// Delimiters and line rules for `applyFormat`.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsFormatDescriptor {
    pub prefix: String,
    pub suffix: String,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default)]
    pub exclusive_line: bool,
}

impl From<JsFormatDescriptor> for FormatDescriptor {
    fn from(js: JsFormatDescriptor) -> Self {
        Self {
            prefix: js.prefix,
            suffix: js.suffix,
            multiline: js.multiline,
            exclusive_line: js.exclusive_line,
        }
    }
}

/// Text field snapshot as JavaScript sees it.
///
/// Offsets are UTF-16 code units, the same unit as `textarea.selectionStart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsFieldState {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
    #[serde(default)]
    pub scroll_offset: i32,
}

impl From<JsFieldState> for TextFieldState {
    fn from(js: JsFieldState) -> Self {
        TextFieldState {
            selection_start: utf16_to_char_offset(&js.value, js.selection_start),
            selection_end: utf16_to_char_offset(&js.value, js.selection_end),
            scroll_offset: js.scroll_offset,
            value: js.value,
        }
    }
}

impl From<TextFieldState> for JsFieldState {
    fn from(state: TextFieldState) -> Self {
        Self {
            selection_start: char_to_utf16_offset(&state.value, state.selection_start),
            selection_end: char_to_utf16_offset(&state.value, state.selection_end),
            scroll_offset: state.scroll_offset,
            value: state.value,
        }
    }
}
