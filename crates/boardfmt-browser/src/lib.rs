//! Browser DOM layer for boardfmt.
//!
//! This crate provides:
//! - `TextareaField` - `TextField` over a `<textarea>`, with UTF-16 offset conversion
//! - `inject_css` / `mount_toolbar` - stylesheet and toolbar injection
//! - `key_event_from_dom` - DOM keydown to core `KeyEvent`
//! - `FormattingTools` - installs the toolbar and routes page events
//!
//! The core formatting logic lives in `boardfmt-core`; everything here is a
//! thin DOM adapter around it.

pub mod error;
pub mod events;
pub mod field;
pub mod shell;
pub mod toolbar;

// Browser-specific exports.
pub use error::{BrowserError, document};
pub use events::{
    FORMAT_ATTRIBUTE, QUICK_REPLY_BODY_SELECTOR, QUICK_REPLY_CLOSE_SELECTOR, REPLY_BODY_SELECTOR,
    classify_key_target, key_event_from_dom, modifiers_from_event, toolbar_button_from_event,
};
pub use field::TextareaField;
pub use shell::FormattingTools;
pub use toolbar::{GENERATED_STYLE_SELECTOR, STYLE_ELEMENT_ID, inject_css, mount_toolbar};

// Re-export core for convenience.
pub use boardfmt_core;
