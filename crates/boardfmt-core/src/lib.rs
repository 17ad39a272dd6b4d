//! boardfmt-core: formatting logic for an imageboard reply box, without any
//! browser dependencies.
//!
//! This crate provides:
//! - `FormatDescriptor` / `FormatTable` - markup styles and the toolbar table
//! - `apply_format` - the selection formatter, pure over `TextFieldState`
//! - `TextField` - the host-field abstraction the browser layer implements
//! - key model and `resolve_keydown` for shortcuts and page conveniences
//! - `PageContext` and the toolbar markup/stylesheet

pub mod field;
pub mod format;
pub mod keys;
pub mod offsets;
pub mod page;
pub mod toolbar;
pub mod wrap;

pub use smol_str::SmolStr;

pub use field::{MemoryField, TextField, TextFieldState};
pub use format::{FormatDescriptor, FormatEntry, FormatTable, FormatTableError};
pub use keys::{
    Key, KeyCombo, KeyEvent, KeyTarget, KeydownResult, Modifiers, PageAction, resolve_keydown,
};
pub use offsets::{char_to_utf16_offset, utf16_to_char_offset};
pub use page::{PageContext, PageKind};
pub use toolbar::{
    TOOLBAR_BUTTON_SELECTOR, TOOLBAR_CLASS, TOOLBAR_CSS, TOOLBAR_SEPARATOR, render_button,
    render_toolbar_html, toolbar_hint,
};
pub use wrap::{apply_format, wrap_field};
