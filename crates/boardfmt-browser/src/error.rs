//! Error type for DOM operations.

use wasm_bindgen::JsValue;

#[derive(thiserror::Error, Debug)]
pub enum BrowserError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    /// A required element is not in the page.
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for BrowserError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => BrowserError::Dom(message),
            None => BrowserError::Dom(format!("{value:?}")),
        }
    }
}

impl From<BrowserError> for JsValue {
    fn from(err: BrowserError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// The global `document`.
pub fn document() -> Result<web_sys::Document, BrowserError> {
    web_sys::window()
        .ok_or(BrowserError::NoWindow)?
        .document()
        .ok_or(BrowserError::NoDocument)
}
