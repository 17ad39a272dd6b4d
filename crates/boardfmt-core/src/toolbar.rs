//! Toolbar markup and stylesheet.
//!
//! The browser layer injects these as-is; generating them here keeps the
//! markup testable without a DOM.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::format::{FormatEntry, FormatTable};

/// Class of the toolbar container element.
pub const TOOLBAR_CLASS: &str = "tf-toolbar";

/// Selector matching toolbar buttons.
pub const TOOLBAR_BUTTON_SELECTOR: &str = ".tf-toolbar a[data-format]";

/// Separator between toolbar buttons.
pub const TOOLBAR_SEPARATOR: &str = " | ";

/// Stylesheet for the toolbar.
pub const TOOLBAR_CSS: &str = r#"
/* generated by boardfmt */
.tf-toolbar {
  padding: 0px 5px 1px 5px;
}
.tf-toolbar :link {
  text-decoration: none;
}
.tf-toolbar a[data-format="bold"] {
  font-weight: bold;
}
.tf-toolbar a[data-format="italics"] {
  font-style: italic;
}
.tf-toolbar a[data-format="under"] {
  text-decoration: underline;
}
.tf-toolbar a[data-format="code"] {
  font-family: "Courier New", Courier, monospace;
}
.tf-toolbar a[data-format="strike"] {
  text-decoration: line-through;
}
.tf-toolbar a[data-format="heading"] {
  color: #AF0A0F; font-weight: bold;
}
"#;

/// Tooltip for an entry: the alt text, plus the shortcut when one is bound.
///
/// `None` when the entry has no alt text; the shortcut alone is not shown.
pub fn toolbar_hint(entry: &FormatEntry) -> Option<String> {
    let alt = entry.alt_text.as_deref().filter(|alt| !alt.is_empty())?;
    Some(match entry.shortcut_key {
        Some(key) => format!("{alt} (ctrl+{key})"),
        None => alt.to_string(),
    })
}

/// Render one button.
pub fn render_button(entry: &FormatEntry) -> String {
    let title = toolbar_hint(entry)
        .map(|hint| format!(" title=\"{}\"", encode_double_quoted_attribute(&hint)))
        .unwrap_or_default();

    format!(
        "<a href=\"javascript:void(0)\"{title} data-format=\"{}\">{}</a>",
        encode_double_quoted_attribute(&entry.name),
        encode_text(&entry.display_text),
    )
}

/// Render the inner HTML of the toolbar: one button per entry, in table order.
pub fn render_toolbar_html(table: &FormatTable) -> String {
    table
        .iter()
        .map(render_button)
        .collect::<Vec<_>>()
        .join(TOOLBAR_SEPARATOR)
}
